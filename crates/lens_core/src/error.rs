//! Error types for the analysis core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur during aggregation.
///
/// Cost data problems are fatal for the run; log sources degrade
/// per-source and never surface here.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Cost data file not readable: {path}: {source}")]
    CostDataUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid cost data in {path}: {source}")]
    CostDataInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}
