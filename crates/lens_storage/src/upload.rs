//! HTTP upload of finished artifacts.

use std::time::Duration;

use tracing::info;

use crate::error::{StorageError, StorageResult};

/// PUTs artifacts to `{base_url}/{filename}`.
pub struct Uploader {
    base_url: String,
    client: reqwest::Client,
}

impl Uploader {
    /// Create an uploader with a bounded per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> StorageResult<Self> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Upload(base_url.clone(), e))?;
        Ok(Self { base_url, client })
    }

    /// Upload one artifact body under the given filename.
    pub async fn upload(
        &self,
        filename: &str,
        content: &str,
        content_type: &str,
    ) -> StorageResult<()> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), filename);

        let response = self
            .client
            .put(&url)
            .header("content-type", content_type)
            .header("cache-control", "no-cache, no-store, must-revalidate")
            .body(content.to_string())
            .send()
            .await
            .map_err(|e| StorageError::Upload(filename.to_string(), e))?;

        if !response.status().is_success() {
            return Err(StorageError::UploadStatus(
                filename.to_string(),
                response.status().as_u16(),
            ));
        }

        info!("Uploaded {} to {}", filename, url);
        Ok(())
    }
}
