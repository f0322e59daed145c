//! Error types for the report splitter.
//!
//! A single `SplitError` covers every fatal condition. Skipping a section
//! is not an error: handlers signal it through
//! [`HandlerOutcome::Skip`](crate::registry::HandlerOutcome::Skip).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Header line is structurally broken or names no usable path.
    #[error("Invalid entry in the source file: '{0}'")]
    InvalidEntry(String),

    /// Failed to create a directory under the destination root.
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or truncate a destination file.
    #[error("Failed to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination would resolve outside the output directory through a
    /// symlink already present on disk.
    #[error("Destination escapes the output directory: {}", .0.display())]
    EscapesBase(PathBuf),

    /// A path remapper rejected a path.
    #[error("Path remapping failed for '{path}': {reason}")]
    Remap { path: String, reason: String },

    /// Reading the report failed.
    #[error("Failed to read report at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// Writing section content into a sink failed.
    #[error("Failed to write '{kind}' section: {source}")]
    Write {
        kind: String,
        #[source]
        source: std::io::Error,
    },

    /// Destination root exists but is not a directory.
    #[error("Output path is not a directory: {}", .0.display())]
    InvalidOutputDir(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitError>;
