//! # lens_storage
//!
//! Persistence of finished CloudLens artifacts: the plain-text report,
//! the JSON report payload, and the dashboard configuration payload,
//! written to a local output directory and optionally uploaded via
//! HTTP PUT.
//!
//! Artifacts are only ever written for a fully assembled report; a
//! failed upload marks the run as failed without corrupting the local
//! copies.

pub mod artifacts;
pub mod dashboard;
pub mod error;
pub mod upload;

pub use artifacts::ArtifactStore;
pub use dashboard::DashboardConfig;
pub use error::{StorageError, StorageResult};
pub use upload::Uploader;
