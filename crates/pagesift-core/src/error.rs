//! Error types for Pagesift.
//!
//! Ineligible items are not errors: builders return `Ok(None)` for them.
//! The variants here cover the cases where indexing cannot proceed at all.

use std::path::{Path, PathBuf};

/// Errors that can occur while extracting index data.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A structural item required for indexing could not be resolved.
    #[error("{kind} not found: {id}")]
    MissingItem {
        /// What kind of item was requested (component, template, ...)
        kind: &'static str,
        /// Identifier of the missing item
        id: String,
    },

    /// An identifier string could not be parsed.
    #[error("Invalid identifier: {value}")]
    InvalidId {
        /// The offending input
        value: String,
    },

    /// The host content repository failed.
    #[error("Repository error: {message}")]
    Repository {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error with the offending path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Pagesift operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a missing-item error.
    pub fn missing(kind: &'static str, id: impl ToString) -> Self {
        Error::MissingItem {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates an invalid-identifier error.
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Error::InvalidId {
            value: value.into(),
        }
    }

    /// Creates a repository error with a message.
    pub fn repository<S: Into<String>>(message: S) -> Self {
        Error::Repository {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a repository error with a message and source error.
    pub fn repository_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Repository {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns whether this error means a required item was absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Error::MissingItem { .. })
    }
}
