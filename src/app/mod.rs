//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (main.rs) and the cache, API and
//! worker layers. It never performs I/O: every network call and timer leaves
//! as an [`Action`] and comes back as an [`Event`].
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Command line → Events → Event Handler → State Mutations → Actions → Worker
//!                              ↑                                        ↓
//!                              └────────── Worker Responses ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`commands`]: Line command parsing per screen
//! - [`debounce`]: Generation-based search debouncer
//! - [`detail`]: Single-note controller
//! - [`form`]: Create-note form state
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`list`]: Note list controller and its tagged view state
//! - [`modes`]: Screen state
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use notehub::app::{handle_event, AppState, Event};
//! use notehub::Theme;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(Theme::default(), Duration::from_millis(700), 64);
//! let (_render, actions) = handle_event(&mut state, &Event::OpenRoute { tag: None })?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), notehub::NoteHubError>(())
//! ```

pub mod actions;
pub mod commands;
pub mod debounce;
pub mod detail;
pub mod form;
pub mod handler;
pub mod list;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use commands::parse_command;
pub use debounce::{DebounceTicket, Debouncer, DEFAULT_DEBOUNCE};
pub use detail::{DetailController, DetailView};
pub use form::NoteForm;
pub use handler::{handle_event, Event};
pub use list::{ListController, ListView, RenderFlags};
pub use modes::Screen;
pub use state::AppState;
