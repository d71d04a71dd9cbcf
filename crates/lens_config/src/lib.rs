//! # lens_config
//!
//! Configuration loading and validation for CloudLens.
//!
//! The configuration is an explicit, immutable value constructed once at
//! startup: `ConfigLoader::load` reads the YAML file, merges the
//! recognized environment overrides, and hands back a fully typed
//! [`Config`] that is passed by reference into every component. Nothing
//! downstream reads the environment or re-parses the file.
//!
//! Log sources may be written as bare path strings or structured
//! mappings; both normalize to [`LogSource`] at this boundary.

pub mod error;
pub mod loader;
pub mod models;
pub mod validator;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use models::*;
pub use validator::{ConfigValidator, ValidationResult};
