//! Initial manifest from duplicate reports

use crate::error::ManifestError;
use crate::manifest::entry::{Manifest, ManifestEntry, Operation};
use crate::similarity::{report_similarities, Classification, SimilarityState};
use crate::tree::Tree;
use crate::types::{hash_to_hex, Hash};
use std::collections::HashSet;
use tracing::{debug, info};

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;

/// Human-readable size with one decimal, 1024 based
pub fn format_bytes(size: u64) -> String {
    let (value, unit) = if size >= GB {
        (size as f64 / GB as f64, "GB")
    } else if size >= MB {
        (size as f64 / MB as f64, "MB")
    } else if size >= KB {
        (size as f64 / KB as f64, "KB")
    } else {
        (size as f64, "B")
    };
    format!("{:.1}{}", value, unit)
}

/// Totals gathered while writing a manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    pub groups: usize,
    pub entries: usize,
    /// Bytes freed if all but one member of every group were removed
    pub reclaimable: u64,
}

/// Write one `keep` line per member of every full-duplicate group.
///
/// Groups containing a file are skipped unless `include_files` is set, so by
/// default only whole duplicated directories are listed. A group is written
/// once even when a single-child parent reports it again.
pub fn write_manifest(
    tree: &Tree,
    classification: &Classification,
    include_files: bool,
) -> Result<(Manifest, ManifestSummary), ManifestError> {
    let mut manifest = Manifest::new();
    let mut summary = ManifestSummary::default();
    let mut failure: Option<ManifestError> = None;
    let mut written: HashSet<Hash> = HashSet::new();

    report_similarities(tree, classification, |report| {
        if failure.is_some() || report.state != SimilarityState::FullDuplicate {
            return;
        }
        if !include_files && report.group.iter().any(|id| tree.is_file(*id)) {
            return;
        }
        let Some(&first) = report.group.first() else {
            return;
        };
        let reference = tree.node(first);
        if !written.insert(reference.hash) {
            debug!(path = tree.full_path(report.subject), "Group already written");
            return;
        }
        let consistent = report.group.iter().all(|id| {
            let node = tree.node(*id);
            node.size == reference.size && node.file_count == reference.file_count
        });
        if !consistent {
            failure = Some(ManifestError::InconsistentGroup {
                hash: hash_to_hex(&reference.hash),
                paths: report
                    .group
                    .iter()
                    .map(|id| tree.full_path(*id).to_string())
                    .collect(),
            });
            return;
        }

        for id in &report.group {
            let node = tree.node(*id);
            manifest.push_entry(ManifestEntry::new(
                Operation::Keep,
                hash_to_hex(&node.hash),
                tree.full_path(*id),
            ));
        }
        let noun = if tree.is_file(first) { "files" } else { "dirs" };
        manifest.push_comment(format!(
            "# {} {}, each {} in {} files",
            report.group.len(),
            noun,
            format_bytes(reference.size),
            reference.file_count
        ));
        manifest.push_comment("#");

        summary.groups += 1;
        summary.entries += report.group.len();
        summary.reclaimable += (report.group.len() as u64 - 1) * reference.size;
    });

    if let Some(err) = failure {
        return Err(err);
    }

    manifest.push_comment(format!(
        "# Total {} of duplicates to remove",
        format_bytes(summary.reclaimable)
    ));
    info!(
        groups = summary.groups,
        entries = summary.entries,
        reclaimable = summary.reclaimable,
        "Manifest written"
    );
    Ok((manifest, summary))
}
