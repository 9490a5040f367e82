//! Error types for devotion-store.
//!
//! Only failures of the persistence medium reach callers. Malformed blobs
//! and failed reads are absorbed by the tables and replaced by defaults, so
//! in practice these errors come out of mutating operations whose write
//! did not land.

use std::path::PathBuf;

/// Result type for devotion-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in devotion-store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Reading a key from the file medium failed.
    #[error("Failed to read {key}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },

    /// Writing a key to the file medium failed.
    #[error("Failed to write {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    /// Failed to create the data directory.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The medium refused the operation (quota, injected failure, ...).
    #[error("Storage unavailable for {operation} of {key}")]
    Unavailable {
        key: String,
        operation: &'static str,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
