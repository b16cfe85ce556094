//! Error types for toolscout-core.

use std::path::{Path, PathBuf};

/// Errors shared across the Toolscout crates.
///
/// Marked `#[non_exhaustive]` so new variants can be added without
/// breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error tied to a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that was being read or written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Malformed content file
    #[error("Content error in {}: {message}", path.display())]
    Content {
        /// Content file that failed to parse
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// TOML file that failed to parse
    #[error("Failed to parse {}: {source}", path.display())]
    Toml {
        /// File being parsed
        path: PathBuf,
        /// Underlying TOML failure
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience `Result` type alias for Toolscout operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wraps a TOML parse failure with the file it came from.
    pub fn toml(source: toml::de::Error, path: impl AsRef<Path>) -> Self {
        Error::Toml {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new content error for a file.
    pub fn content<S: Into<String>>(path: impl AsRef<Path>, message: S) -> Self {
        Error::Content {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}
