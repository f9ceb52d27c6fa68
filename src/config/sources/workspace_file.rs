//! Workspace config file source: culler.toml and culler.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Add workspace config files to builder.
/// Precedence: culler.toml (base) then culler.{CULLER_ENV}.toml when CULLER_ENV is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = workspace_root.join("culler.toml");
    if base_config_path.exists() {
        debug!(config_path = %base_config_path.display(), "Using workspace configuration");
        builder = builder.add_source(File::from(base_config_path.as_path()).required(false));
    }

    if let Ok(env_name) = std::env::var("CULLER_ENV") {
        let env_config_path = workspace_root.join(format!("culler.{}.toml", env_name));
        if env_config_path.exists() {
            debug!(config_path = %env_config_path.display(), "Using environment configuration");
            builder = builder.add_source(File::from(env_config_path.as_path()).required(false));
        }
    }

    Ok(builder)
}
