//! Terminal rendering layer.
//!
//! Transforms application state into ANSI-styled output through small
//! composable components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Per-component renderers and per-screen layouts
//! - [`helpers`]: Cursor positioning, padding and match highlighting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailPanel, DisplayItem, EmptyState, FooterInfo, FormFieldRow, FormPanel, HeaderInfo, PaginationInfo,
    SearchBarInfo, StatusKind, StatusLine, UIViewModel,
};
