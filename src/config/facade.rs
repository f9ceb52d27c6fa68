//! Layered configuration loading

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::CullerConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Loads [`CullerConfig`] from defaults, files and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a working directory.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `culler.toml`, workspace `culler.{CULLER_ENV}.toml`, `CULLER__SECTION__KEY`
    /// environment variables.
    pub fn load(workspace_root: &Path) -> Result<CullerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder)
    }

    /// Load configuration from one explicit file plus environment overrides
    pub fn load_from_file(path: &Path) -> Result<CullerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<CullerConfig, ConfigError> {
        builder
            .add_source(
                Environment::with_prefix("CULLER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ignore.names")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
