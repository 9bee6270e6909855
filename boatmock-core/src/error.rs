//! Structured error types for boatmock-core.
//!
//! Library consumers get `thiserror` enums; the binary wraps them in
//! `anyhow` at command boundaries.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gateway filesystem operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Reading the record directory itself failed
    #[error("Failed to read directory {path:?}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },

    /// Any other I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON serialization failed
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type alias for boatmock-core operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Create a directory read error
    pub fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }
}
