//! Error types for the enrichment module.

use thiserror::Error;

/// Result type alias for enrichment operations.
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Errors from the text analysis service.
///
/// All of these are non-fatal to an analysis run: the caller logs a
/// warning and substitutes empty insights.
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("Enrichment endpoint not configured")]
    NotConfigured,

    #[error("Enrichment request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Enrichment service returned status {0}")]
    Status(u16),
}
