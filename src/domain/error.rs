//! Error types for the NoteHub client.
//!
//! This module defines the centralized error type [`NoteHubError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! Errors fall into two user-facing families:
//!
//! - **Fetch failures** ([`NoteHubError::Network`], [`NoteHubError::Status`],
//!   [`NoteHubError::Decode`]): the notes service could not be reached or
//!   answered with something unusable. Recovered by retrying.
//! - **Validation failures** ([`NoteHubError::Validation`]): the create-note form
//!   was rejected before any request was made.

use crate::domain::validation::FieldErrors;
use thiserror::Error;

/// The main error type for NoteHub client operations.
///
/// # Examples
///
/// ```
/// use notehub::NoteHubError;
///
/// let err = NoteHubError::Status { status: 503 };
/// assert!(err.is_fetch_failure());
/// assert_eq!(err.to_string(), "Notes service responded with status 503");
/// ```
#[derive(Debug, Error)]
pub enum NoteHubError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The notes service answered with a non-success status code.
    #[error("Notes service responded with status {status}")]
    Status {
        /// HTTP status code returned by the service.
        status: u16,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Create-note form values failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The fetch worker could not accept or deliver a message.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl NoteHubError {
    /// Returns `true` for the errors the UI reports as a failed fetch.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Status { .. } | Self::Decode(_)
        )
    }
}

impl From<reqwest::Error> for NoteHubError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for NoteHubError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid API URL: {err}"))
    }
}

/// A specialized `Result` type for NoteHub operations.
pub type Result<T> = std::result::Result<T, NoteHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failures_are_grouped() {
        assert!(NoteHubError::Network("refused".into()).is_fetch_failure());
        assert!(NoteHubError::Decode("eof".into()).is_fetch_failure());
        assert!(!NoteHubError::Config("bad".into()).is_fetch_failure());
        assert!(!NoteHubError::Validation(FieldErrors::default()).is_fetch_failure());
    }
}
