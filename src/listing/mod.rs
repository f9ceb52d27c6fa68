//! Listing generator
//!
//! Walks a directory and writes one `<path>\t<size>\t<signature>` line per
//! regular file, in path order.

pub mod signature;
pub mod walker;

pub use signature::{HashMode, Signer, DEFAULT_SAMPLE_SIZE};
pub use walker::{FileEntry, WalkStats, Walker, WalkerConfig};

use crate::error::ApiError;
use crate::tree::listing::format_line;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Counters from one listing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingSummary {
    pub files: usize,
    pub skipped: usize,
    pub total_size: u64,
}

/// List `root` into `out`.
///
/// The root is canonicalized first so listings taken from different working
/// directories line up. Files whose path cannot be represented in a listing
/// line, or that cannot be read, are skipped with a warning.
pub fn generate_listing<W: Write>(
    root: &Path,
    signer: Signer,
    config: WalkerConfig,
    out: &mut W,
) -> Result<ListingSummary, ApiError> {
    let start = Instant::now();
    let root = dunce::canonicalize(root).map_err(|e| ApiError::io(root, e))?;
    info!(root = %root.display(), mode = %signer.mode(), "Listing started");

    let walker = Walker::with_config(root.clone(), config);
    let (files, stats) = walker.walk();

    let mut summary = ListingSummary {
        skipped: stats.unreadable,
        ..ListingSummary::default()
    };
    for file in files {
        let Some(path) = file.path.to_str() else {
            warn!(path = ?file.path, "Skipping path that is not valid UTF-8");
            summary.skipped += 1;
            continue;
        };
        if path.contains('\t') || path.contains('\n') {
            warn!(path, "Skipping path containing a tab or newline");
            summary.skipped += 1;
            continue;
        }
        let signature = match signer.sign(&file.path, file.size) {
            Ok(signature) => signature,
            Err(err) => {
                warn!(path, error = %err, "Skipping unreadable file");
                summary.skipped += 1;
                continue;
            }
        };
        writeln!(out, "{}", format_line(path, file.size, &signature))
            .map_err(|e| ApiError::io(&file.path, e))?;
        summary.files += 1;
        summary.total_size += file.size;
    }

    info!(
        files = summary.files,
        skipped = summary.skipped,
        ignored = stats.ignored,
        total_size = summary.total_size,
        duration_ms = start.elapsed().as_millis(),
        "Listing completed"
    );
    Ok(summary)
}
