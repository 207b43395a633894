//! Screen state of the application.
//!
//! The application shows exactly one screen at a time. The screen decides how
//! a typed line is interpreted and which panel the renderer draws.
//!
//! - **Notes**: the paginated, searchable note list of the current tag route
//! - **Compose**: the create-note form
//! - **Detail**: a single note

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Default list screen.
    #[default]
    Notes,

    /// Create-note form. The list stays mounted underneath and keeps its
    /// search text, page and tag.
    Compose,

    /// Single-note view opened from the list.
    Detail,
}

impl Screen {
    /// Key hints shown in the footer.
    #[must_use]
    pub const fn hints(self) -> &'static str {
        match self {
            Self::Notes => "/text search · n/p page · g N go to · t TAG filter · v N view · c create · r retry · q quit",
            Self::Compose => "title … · content … · tag … · submit · cancel",
            Self::Detail => "b back · r retry · q quit",
        }
    }
}
