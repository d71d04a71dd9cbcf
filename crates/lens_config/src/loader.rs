//! Config file loading with one-shot environment overrides.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::models::Config;

/// Loader for CloudLens configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file.
    ///
    /// A missing file falls back to defaults with a warning; unreadable
    /// or malformed YAML is an error. Environment overrides are applied
    /// here, once, so the rest of the pipeline sees a fixed value.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Config> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            debug!("Loading configuration from {:?}", path);
            let content = std::fs::read_to_string(path).map_err(|source| {
                ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            serde_yaml::from_str(&content)?
        } else {
            warn!("Config file not found: {:?}, using defaults", path);
            Config::default()
        };

        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Merge recognized environment variables into the configuration.
    fn apply_env_overrides(config: &mut Config) {
        if let Ok(url) = std::env::var("LENS_UPLOAD_URL") {
            if !url.is_empty() {
                debug!("Overriding storage.upload_url from environment");
                config.storage.upload_url = Some(url);
            }
        }

        if let Ok(url) = std::env::var("LENS_ENRICH_URL") {
            if !url.is_empty() {
                debug!("Overriding enrichment.endpoint from environment");
                config.enrichment.endpoint = Some(url);
            }
        }

        if let Ok(sender) = std::env::var("LENS_EMAIL_SENDER") {
            if !sender.is_empty() {
                config.notifications.email.sender = Some(sender);
            }
        }

        if let Ok(recipients) = std::env::var("LENS_EMAIL_RECIPIENTS") {
            if !recipients.is_empty() {
                config.notifications.email.recipients = recipients
                    .split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect();
            }
        }
    }
}
