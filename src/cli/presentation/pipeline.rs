//! Listing, manifest and verify summaries.

use crate::listing::ListingSummary;
use crate::manifest::{format_bytes, Manifest};
use std::path::Path;

pub fn format_listing_summary(summary: &ListingSummary) -> String {
    format!(
        "Listed {} files ({}), skipped {}",
        summary.files,
        format_bytes(summary.total_size),
        summary.skipped
    )
}

pub fn format_verify_summary(manifest: &Manifest) -> String {
    let groups = manifest.hash_groups();
    let moves = manifest
        .entries()
        .filter(|e| e.operation == crate::manifest::Operation::Move)
        .count();
    format!(
        "Manifest OK: {} entries in {} groups, {} to move\n",
        manifest.entries().count(),
        groups.len(),
        moves
    )
}

pub fn format_written(manifest: &Manifest, path: &Path) -> String {
    format!(
        "Wrote {} entries to {}\n",
        manifest.entries().count(),
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_summary_counts_moves() {
        let manifest = Manifest::parse("#\nkeep\th1\ta\nmove\th1\tb\nkeep\th2\tc\n").unwrap();
        assert_eq!(
            format_verify_summary(&manifest),
            "Manifest OK: 3 entries in 2 groups, 1 to move\n"
        );
    }
}
