//! Locations of the client's data and config files.
//!
//! Follows the XDG base directory layout: `$XDG_DATA_HOME/notehub` and
//! `$XDG_CONFIG_HOME/notehub`, falling back to `~/.local/share/notehub` and
//! `~/.config/notehub`. Every lookup has a variant taking the environment as
//! a function so it can be tested without touching process state.

use std::path::PathBuf;

/// Directory name used under the XDG base directories.
pub const APP_DIR: &str = "notehub";

/// Config file name inside [`config_dir`].
pub const CONFIG_FILE: &str = "config.toml";

/// Returns the data directory (trace files), or `None` when neither
/// `XDG_DATA_HOME` nor `HOME` is set.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    data_dir_with(|key| std::env::var(key).ok())
}

/// Returns the config directory, or `None` when neither `XDG_CONFIG_HOME`
/// nor `HOME` is set.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with(|key| std::env::var(key).ok())
}

/// Returns the default config file path, `<config dir>/config.toml`.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn data_dir_with(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    base_dir(&lookup, "XDG_DATA_HOME", &[".local", "share"])
}

pub fn config_dir_with(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    base_dir(&lookup, "XDG_CONFIG_HOME", &[".config"])
}

fn base_dir(lookup: &impl Fn(&str) -> Option<String>, xdg_var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    // Relative XDG values are invalid and ignored.
    if let Some(xdg) = lookup(xdg_var).filter(|v| v.starts_with('/')) {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = lookup("HOME").filter(|v| !v.is_empty())?;
    let mut dir = PathBuf::from(home);
    dir.extend(home_fallback);
    Some(dir.join(APP_DIR))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, and all paths when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use notehub::infrastructure::expand_tilde_with;
///
/// let home = |_: &str| Some("/home/ada".to_string());
/// assert_eq!(expand_tilde_with("~/notes.toml", home).to_str(), Some("/home/ada/notes.toml"));
/// assert_eq!(expand_tilde_with("/etc/notehub.toml", home).to_str(), Some("/etc/notehub.toml"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, |key| std::env::var(key).ok())
}

pub fn expand_tilde_with(path: &str, lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let rest = match path {
        "~" => "",
        _ => match path.strip_prefix("~/") {
            Some(rest) => rest,
            None => return PathBuf::from(path),
        },
    };

    match lookup("HOME") {
        Some(home) if rest.is_empty() => PathBuf::from(home),
        Some(home) => PathBuf::from(home).join(rest),
        None => PathBuf::from(path),
    }
}
