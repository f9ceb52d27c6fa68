//! CLI presentation: text, table and json formatters per command family.

mod analysis;
mod pipeline;

pub use analysis::{format_analysis_json, format_analysis_table, format_analysis_text};
pub use pipeline::{format_listing_summary, format_verify_summary, format_written};
