//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name recorded on the command span (e.g. "analyze", "apply").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List { .. } => "list",
        Commands::Analyze { .. } => "analyze",
        Commands::Manifest { .. } => "manifest",
        Commands::Apply { .. } => "apply",
        Commands::Verify { .. } => "verify",
        Commands::Config => "config",
    }
}
