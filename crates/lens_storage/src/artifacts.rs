//! Artifact persistence to the output directory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Writes run artifacts under a single output directory.
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a plain-text artifact, creating the output directory as
    /// needed. Returns the written path.
    pub fn write_text(&self, filename: &str, content: &str) -> StorageResult<PathBuf> {
        let path = self.prepare(filename)?;
        std::fs::write(&path, content).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Saved artifact: {:?}", path);
        Ok(path)
    }

    /// Write a pretty-printed JSON artifact. Returns the written path.
    pub fn write_json<T: Serialize>(&self, filename: &str, value: &T) -> StorageResult<PathBuf> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::Serialize(filename.to_string(), e))?;
        self.write_text(filename, &content)
    }

    fn prepare(&self, filename: &str) -> StorageResult<PathBuf> {
        if !self.output_dir.exists() {
            debug!("Creating output directory {:?}", self.output_dir);
            std::fs::create_dir_all(&self.output_dir).map_err(|source| StorageError::Write {
                path: self.output_dir.clone(),
                source,
            })?;
        }
        Ok(self.output_dir.join(filename))
    }
}
