//! NoteHub: a terminal client for a remote notes service.
//!
//! The client lists notes page by page, filters them by tag, searches them
//! with a debounced query, opens single notes and creates new ones. Every
//! server response is kept in a keyed query cache so that returning to a
//! page, tag or search already seen renders instantly.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← stdin lines, tokio runtime
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - List, form and detail controllers                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Cache   │   │ Worker Layer  │
//! │ (ui/)         │   │ (cache/)      │   │ (worker/)     │
//! │ - Rendering   │   │ - Keyed pages │   │ - API calls   │
//! │ - Theming     │   │ - Staleness   │   │ - Timers      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                 │
//!                                         ┌───────────────┐
//!                                         │ API (api/)    │
//!                                         │ - HTTP client │
//!                                         └───────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - Notes, tags, validation, errors (domain/)        │
//! │  - XDG paths (infrastructure/)                      │
//! │  - OpenTelemetry file export (observability/)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Notes service client behind the [`api::NotesApi`] trait
//! - [`app`]: Application state machine with event/action model
//! - [`cache`]: Keyed query cache with request tickets and invalidation
//! - [`domain`]: Notes, tags, create-note validation and errors
//! - [`infrastructure`]: Data and config directory lookup
//! - [`observability`]: OpenTelemetry tracing to a rotating file
//! - [`ui`]: Terminal rendering with theme support
//! - [`worker`]: Executes network and timer actions on the tokio runtime
//!
//! # Configuration
//!
//! Sources, later ones winning: built-in defaults, the TOML file
//! (`$XDG_CONFIG_HOME/notehub/config.toml` or `--config PATH`), environment
//! variables, then `key=value` command-line overrides.
//!
//! ```toml
//! api_base_url = "https://notes.example.com/api"
//! api_token = "secret"
//! per_page = 12
//! request_timeout_secs = 10
//! debounce_ms = 700
//! cache_capacity = 64
//! theme = "notehub-light"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use notehub::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::OpenRoute { tag: Some("Work".into()) })?;
//! assert!(should_render);
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), notehub::NoteHubError>(())
//! ```

pub mod api;
pub mod app;
pub mod cache;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Screen};
pub use domain::{Note, NoteHubError, NoteTag, NotesPage, Result};
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Client configuration.
///
/// Every field can be set in the TOML file under the same name, except
/// `theme_name`, which is spelled `theme` everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the notes service; `notes` and `notes/{id}` are resolved
    /// against it.
    pub api_base_url: String,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,

    /// Page size requested from the service. The service default applies
    /// when unset.
    pub per_page: Option<u32>,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Quiet period before typed search text is committed. Default: 700
    pub debounce_ms: u64,

    /// Maximum entries per query cache. Default: 64
    pub cache_capacity: usize,

    /// Built-in theme name (`notehub-dark`, `notehub-light`). Ignored if
    /// `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` is expanded.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            per_page: None,
            request_timeout_secs: 10,
            debounce_ms: 700,
            cache_capacity: 64,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NoteHubError::Config`] if the document is not valid TOML or
    /// a value has the wrong type.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| NoteHubError::Config(format!("invalid config file: {e}")))
    }

    /// Loads the config file.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file there yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match infrastructure::default_config_file() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!(path = %path.display(), "loading config file");
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| NoteHubError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Applies `NOTEHUB_API_URL`, `NOTEHUB_TOKEN` and `NOTEHUB_TRACE` from
    /// `lookup`. Empty values are ignored.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(url) = var("NOTEHUB_API_URL") {
            self.api_base_url = url;
        }
        if let Some(token) = var("NOTEHUB_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(level) = var("NOTEHUB_TRACE") {
            self.trace_level = Some(level);
        }
        self
    }

    /// Builds a configuration from `key=value` pairs over the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use notehub::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("per_page".to_string(), "12".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.per_page, Some(12));
    /// assert_eq!(config.debounce_ms, 700);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies `key=value` overrides. Unknown keys are ignored and numbers
    /// that do not parse keep the current value.
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        for (key, value) in map {
            match key.as_str() {
                "api_base_url" => self.api_base_url.clone_from(value),
                "api_token" => self.api_token = Some(value.clone()).filter(|v| !v.is_empty()),
                "per_page" => self.per_page = parse_number(key, value).or(self.per_page),
                "request_timeout_secs" => {
                    self.request_timeout_secs = parse_number(key, value).unwrap_or(self.request_timeout_secs);
                }
                "debounce_ms" => self.debounce_ms = parse_number(key, value).unwrap_or(self.debounce_ms),
                "cache_capacity" => self.cache_capacity = parse_number(key, value).unwrap_or(self.cache_capacity),
                "theme" => self.theme_name = Some(value.clone()),
                "theme_file" => self.theme_file = Some(value.clone()),
                "trace_level" => self.trace_level = Some(value.clone()),
                _ => tracing::debug!(key = %key, "ignoring unknown config key"),
            }
        }
        self
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        tracing::debug!(key = %key, value = %value, "invalid number in config, keeping previous value");
    }
    parsed
}

/// Creates the application state for `config`.
///
/// The theme comes from `theme_file`, then `theme`, then the built-in
/// default; a theme that fails to load falls through to the next source.
///
/// # Example
///
/// ```rust
/// use notehub::{initialize, Config};
///
/// let config = Config {
///     theme_name: Some("notehub-light".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.theme.name, "notehub-light");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing notehub client");

    let from_file = config.theme_file.as_deref().and_then(|theme_file| {
        Theme::from_file(infrastructure::expand_tilde(theme_file))
            .inspect_err(|e| tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file"))
            .ok()
    });
    let theme = from_file
        .or_else(|| {
            config.theme_name.as_deref().and_then(|theme_name| {
                Theme::from_name(theme_name)
                    .inspect_err(|e| tracing::debug!(theme_name = %theme_name, error = %e, "failed to load theme"))
                    .ok()
            })
        })
        .unwrap_or_default();

    AppState::new(theme, config.debounce_delay(), config.cache_capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn toml_keys_override_defaults() {
        let config = Config::from_toml_str(
            r#"
                api_base_url = "https://notes.example.com/api"
                per_page = 12
                theme = "notehub-light"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://notes.example.com/api");
        assert_eq!(config.per_page, Some(12));
        assert_eq!(config.theme_name.as_deref(), Some("notehub-light"));
        assert_eq!(config.debounce_ms, 700);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(Config::from_toml_str("per_page = \"many\""), Err(NoteHubError::Config(_))));
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("missing.toml").as_path())).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache_capacity = 8").unwrap();
        assert_eq!(Config::load(Some(file.path())).unwrap().cache_capacity, 8);
    }

    #[test]
    fn later_sources_win() {
        let file = Config::from_toml_str("api_base_url = \"http://file\"\ntrace_level = \"warn\"").unwrap();
        let env = file.with_env(|key| match key {
            "NOTEHUB_API_URL" => Some("http://env".to_string()),
            "NOTEHUB_TRACE" => Some(String::new()),
            _ => None,
        });
        assert_eq!(env.api_base_url, "http://env");
        assert_eq!(env.trace_level.as_deref(), Some("warn"));

        let mut map = BTreeMap::new();
        map.insert("api_base_url".to_string(), "http://cli".to_string());
        map.insert("cache_capacity".to_string(), "-3".to_string());
        let cli = env.with_overrides(&map);
        assert_eq!(cli.api_base_url, "http://cli");
        assert_eq!(cli.cache_capacity, 64);
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, ui::theme::DEFAULT_THEME);
    }
}
