//! Domain layer for the NoteHub client.
//!
//! Core types independent of transport, caching and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`note`]: Note, tag vocabulary and route tag normalization
//! - [`validation`]: Create-note form values and rules

pub mod error;
pub mod note;
pub mod validation;

pub use error::{NoteHubError, Result};
pub use note::{CreateNotePayload, Note, NoteTag, NotesPage, TagFilter};
pub use validation::{Field, FieldErrors, NoteDraft};
