//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global and workspace
//! config files, then `CULLER__SECTION__KEY` environment variables.

use crate::error::ApiError;
use crate::listing::{HashMode, DEFAULT_SAMPLE_SIZE};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod facade;
mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Names that are dropped from listings unless `--no-ignore` is given
pub const DEFAULT_IGNORED_NAMES: &[&str] = &["Thumbs.db", "._.DS_Store", ".DS_Store"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CullerConfig {
    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path segments that exclude a listing line from the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default = "default_ignored_names")]
    pub names: Vec<String>,
}

fn default_ignored_names() -> Vec<String> {
    DEFAULT_IGNORED_NAMES.iter().map(|s| s.to_string()).collect()
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            names: default_ignored_names(),
        }
    }
}

/// Listing generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub hash_mode: HashMode,

    /// Bytes read by the `sample` hash mode
    #[serde(default = "default_sample_size")]
    pub sample_size: u64,
}

fn default_sample_size() -> u64 {
    DEFAULT_SAMPLE_SIZE
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            hash_mode: HashMode::default(),
            sample_size: default_sample_size(),
        }
    }
}

/// Manifest writer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Also list duplicate groups made of single files
    #[serde(default)]
    pub include_files: bool,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Ignore(String),
    Listing(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Ignore(msg) => write!(f, "Ignore: {}", msg),
            ValidationError::Listing(msg) => write!(f, "Listing: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl CullerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for name in &self.ignore.names {
            if name.is_empty() || name.contains('/') {
                errors.push(ValidationError::Ignore(format!(
                    "'{}' is not a single path segment",
                    name
                )));
            }
        }

        if self.listing.sample_size == 0 {
            errors.push(ValidationError::Listing(
                "sample_size must be greater than zero".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load from an explicit file or from the layered sources, then validate
    pub fn resolve(explicit: Option<&Path>, workspace_root: &Path) -> Result<Self, ApiError> {
        let config = match explicit {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(workspace_root),
        }
        .map_err(|e| ApiError::ConfigError(format!("Failed to load config: {}", e)))?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
