//! Analyze command presentation: compact text, table and json.

use crate::error::ApiError;
use crate::manifest::format_bytes;
use crate::similarity::{Classification, Report};
use crate::tree::Tree;
use crate::types::hash_to_hex;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// One line per report: `<code>\t<hash>\t<path>\t<path>...`
pub fn format_analysis_text(tree: &Tree, reports: &[Report]) -> String {
    let mut output = String::new();
    for report in reports {
        let paths: Vec<&str> = report.group.iter().map(|id| tree.full_path(*id)).collect();
        output.push_str(&format!(
            "{}\t{}\t{}\n",
            report.state.code(),
            hash_to_hex(&tree.node(report.subject).hash),
            paths.join("\t")
        ));
    }
    output
}

pub fn format_analysis_table(
    tree: &Tree,
    classification: &Classification,
    reports: &[Report],
) -> String {
    let mut output = format!("{}\n", "Similarity report".bold().underline());
    if reports.is_empty() {
        output.push_str("Nothing to report.\n");
        return output;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["State", "Size", "Files", "Hash", "Paths"]);
    for report in reports {
        let node = tree.node(report.subject);
        let hex = hash_to_hex(&node.hash);
        let paths: Vec<&str> = report.group.iter().map(|id| tree.full_path(*id)).collect();
        table.add_row(vec![
            report.state.name().to_string(),
            format_bytes(node.size),
            node.file_count.to_string(),
            hex[..12].to_string(),
            paths.join("\n"),
        ]);
    }
    output.push_str(&table.to_string());
    output.push('\n');

    let counts: Vec<String> = classification
        .counts()
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(state, count)| format!("{} {}", count, state.name()))
        .collect();
    output.push_str(&format!("\nNodes: {}\n", counts.join(", ")));
    output
}

pub fn format_analysis_json(
    tree: &Tree,
    classification: &Classification,
    reports: &[Report],
) -> Result<String, ApiError> {
    let rows: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            let node = tree.node(report.subject);
            json!({
                "state": report.state,
                "hash": hash_to_hex(&node.hash),
                "size": node.size,
                "files": node.file_count,
                "paths": report
                    .group
                    .iter()
                    .map(|id| tree.full_path(*id))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    let counts: serde_json::Map<String, serde_json::Value> = classification
        .counts()
        .iter()
        .map(|(state, count)| (state.name().to_string(), json!(count)))
        .collect();
    let out = json!({ "reports": rows, "counts": counts });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::InvalidArgument(format!("Failed to render json: {}", e)))
}
