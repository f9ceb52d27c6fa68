//! Merge rules: defaults, override order, conflict handling.

use crate::config::DEFAULT_IGNORED_NAMES;
use crate::listing::DEFAULT_SAMPLE_SIZE;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources replace list values wholesale, so a workspace file that sets
/// `ignore.names` replaces the default names instead of extending them.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("ignore.names", DEFAULT_IGNORED_NAMES.to_vec())?
        .set_default("listing.hash_mode", "full")?
        .set_default("listing.sample_size", DEFAULT_SAMPLE_SIZE as i64)?
        .set_default("manifest.include_files", false)
}
