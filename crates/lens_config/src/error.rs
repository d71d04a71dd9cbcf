//! Error types for the config module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not readable: {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML in config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {0}")]
    ValidationFailed(String),
}
