//! Flat-file roster storage.
//!
//! The whole roster lives in one pretty-printed JSON array that is read in
//! full and rewritten in full by every mutating operation.

mod roster;

pub use roster::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
}
