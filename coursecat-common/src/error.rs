//! Common error types for coursecat

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for coursecat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the generator stages
///
/// Only `RootNotFound`/`NotADirectory` abort a run before any work is done.
/// Per-file problems never surface here; they degrade to a [`crate::Lookup`].
#[derive(Error, Debug)]
pub enum Error {
    /// Input root directory does not exist
    #[error("Input root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Input root exists but is not a directory
    #[error("Input root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog file could not be written
    #[error("Failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}
