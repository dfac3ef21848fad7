use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::services::mpris::MediaError;

/// Error types for the mediabar application.
///
/// Covers startup failures: configuration loading, logging setup and
/// connecting to the media players. Runtime player errors are handled
/// where they occur and never reach this type.
#[derive(Error, Debug)]
pub enum MediabarError {
    /// I/O operation error with file context
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Media player service error
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Tracing subscriber or log file setup failed
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// A specialized `Result` type for mediabar operations.
pub type Result<T> = result::Result<T, MediabarError>;

impl MediabarError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        MediabarError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path that failed.
    pub fn io_at(error: impl fmt::Display, path: &Path) -> Self {
        MediabarError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
