//! Error types for BlogFeed operations.
//!
//! A single `Error` type and `Result<T>` alias shared by every BlogFeed
//! crate. The feed engine only ever produces [`Error::Validation`] and
//! [`Error::NotFound`]; the remaining variants belong to configuration,
//! file handling and the data-source layer.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in BlogFeed operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation referenced an identifier that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input: empty or colliding identifiers, mismatched
    /// identifiers on replace, missing required fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The data source failed or is unavailable.
    #[error("Data source error: {0}")]
    Source(String),

    /// A data-source call did not finish in time.
    #[error("Timed out: {0}")]
    Timeout(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a data source error.
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether retrying the failed operation could succeed.
    ///
    /// Only transport-level failures are transient. Validation and
    /// not-found errors are programming errors and never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Source(_) | Self::Timeout(_))
    }

    /// Whether this is a [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this is a [`Error::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using BlogFeed's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_variant() {
        assert!(matches!(Error::config("x"), Error::Config(_)));
        assert!(matches!(Error::not_found("x"), Error::NotFound(_)));
        assert!(matches!(Error::validation("x"), Error::Validation(_)));
        assert!(matches!(Error::data_source("x"), Error::Source(_)));
        assert!(matches!(Error::timeout("x"), Error::Timeout(_)));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::not_found("post 42").to_string(),
            "Not found: post 42"
        );
        assert_eq!(
            Error::validation("empty identifier").to_string(),
            "Validation error: empty identifier"
        );
    }

    #[test]
    fn test_io_with_path_mentions_path() {
        let err = Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "/data/feed.json",
        );
        let msg = err.to_string();
        assert!(msg.contains("/data/feed.json"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_retryable_only_for_transport_failures() {
        assert!(Error::data_source("503").is_retryable());
        assert!(Error::timeout("fetch").is_retryable());
        assert!(!Error::validation("dup").is_retryable());
        assert!(!Error::not_found("1").is_retryable());
        assert!(!Error::config("bad").is_retryable());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(Error::not_found("1").is_not_found());
        assert!(!Error::not_found("1").is_validation());
        assert!(Error::validation("x").is_validation());
    }

    #[test]
    fn test_from_serde_json() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
