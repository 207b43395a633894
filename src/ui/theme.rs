//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two are built in; any other can be loaded from
//! a file named in the configuration.
//!
//! # Built-in Themes
//!
//! - `notehub-dark`: Dark theme (default)
//! - `notehub-light`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! header_bg = "#1f6feb"        # optional
//! text_normal = "#c9d1d9"
//! text_dim = "#6e7681"
//! border = "#30363d"
//! search_bar_border = "#58a6ff"
//! match_highlight_fg = "#0d1117"
//! match_highlight_bg = "#e3b341"
//! empty_state_fg = "#79c0ff"
//! tag_fg = "#d2a8ff"
//! loading_fg = "#58a6ff"
//! error_fg = "#ff7b72"
//! notice_fg = "#3fb950"
//! page_current_fg = "#0d1117"
//! page_current_bg = "#58a6ff"
//! ```

use crate::domain::{NoteHubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "notehub-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. "#c9d1d9").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, ages and other secondary text.
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    pub tag_fg: String,

    /// Status line colors.
    pub loading_fg: String,
    pub error_fg: String,
    pub notice_fg: String,

    /// Current page marker in the pagination bar.
    pub page_current_fg: String,
    pub page_current_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`NoteHubError::Theme`] for an unknown name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use notehub::Theme;
    ///
    /// let theme = Theme::from_name("notehub-light")?;
    /// assert_eq!(theme.name, "notehub-light");
    /// # Ok::<(), notehub::NoteHubError>(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let toml_str = match name {
            "notehub-dark" => include_str!("../../themes/notehub-dark.toml"),
            "notehub-light" => include_str!("../../themes/notehub-light.toml"),
            _ => return Err(NoteHubError::Theme(format!("unknown theme {name:?}"))),
        };

        Self::from_toml(toml_str)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| NoteHubError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Grey palette used when even the built-in theme cannot be loaded.
    fn plain() -> Self {
        let grey = |hex: &str| hex.to_string();
        Self {
            name: "plain".to_string(),
            colors: ThemeColors {
                header_fg: grey("#ffffff"),
                header_bg: None,
                text_normal: grey("#d0d0d0"),
                text_dim: grey("#808080"),
                border: grey("#606060"),
                search_bar_border: grey("#a0a0a0"),
                match_highlight_fg: grey("#000000"),
                match_highlight_bg: grey("#d0d0d0"),
                empty_state_fg: grey("#ffffff"),
                tag_fg: grey("#a0a0a0"),
                loading_fg: grey("#ffffff"),
                error_fg: grey("#ffffff"),
                notice_fg: grey("#ffffff"),
                page_current_fg: grey("#000000"),
                page_current_bg: grey("#d0d0d0"),
            },
        }
    }

    /// Converts a hex color to RGB, falling back to white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "built-in theme failed to load");
            Self::plain()
        })
    }
}
