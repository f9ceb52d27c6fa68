//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; a single route table dispatches to library operations.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{AnalyzeFormat, Cli, Commands, ListingArgs};
pub use presentation::{format_analysis_json, format_analysis_table, format_analysis_text};
pub use route::RunContext;
