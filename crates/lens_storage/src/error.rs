//! Error types for the storage module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while persisting or uploading artifacts.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize artifact {0}: {1}")]
    Serialize(String, #[source] serde_json::Error),

    #[error("Upload failed for {0}: {1}")]
    Upload(String, #[source] reqwest::Error),

    #[error("Upload of {0} returned status {1}")]
    UploadStatus(String, u16),
}
