//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: truncated titles, match
//! highlight ranges, formatted ages and the status line text.

use crate::app::{RenderFlags, Screen};

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Screen the frame belongs to; decides the layout.
    pub screen: Screen,

    /// Header information (route, page position).
    pub header: HeaderInfo,

    /// Search box contents. Shown on the list screen only.
    pub search_bar: SearchBarInfo,

    /// Loading, error or notice line, if any.
    pub status: Option<StatusLine>,

    /// Rows of the note table, already windowed to the terminal height.
    pub display_items: Vec<DisplayItem>,

    /// Page selector; only present when there is more than one page.
    pub pagination: Option<PaginationInfo>,

    /// Empty state message (a successful fetch with zero notes).
    pub empty_state: Option<EmptyState>,

    /// Create-note form, on the compose screen.
    pub form: Option<FormPanel>,

    /// Single note, on the detail screen once loaded.
    pub detail: Option<DetailPanel>,

    /// Footer information (key hints).
    pub footer: FooterInfo,

    /// Flat render flags of the list query.
    pub flags: RenderFlags,
}

/// One row of the note table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// 1-based position on the page, as accepted by `v N`.
    pub index: usize,

    /// Note title, truncated to the title column.
    pub title: String,

    pub tag: String,

    /// Relative creation time ("5m ago").
    pub age: String,

    /// Character ranges of the title matching the committed search.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary hint text.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed, including input not yet committed.
    pub query: String,

    /// Whether the typed text is still waiting out the debounce period.
    pub pending: bool,
}

/// Kind of the status line, which selects its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current: u32,
    pub total: u32,
}

/// The create-note form as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPanel {
    pub fields: Vec<FormFieldRow>,
    pub submitting: bool,
    pub submit_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldRow {
    pub label: &'static str,
    pub value: String,
    /// Inline validation message.
    pub error: Option<String>,
}

/// A loaded note as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub title: String,
    pub tag: String,
    pub created: String,
    /// Content wrapped to the terminal width.
    pub body: Vec<String>,
}
