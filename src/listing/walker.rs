//! Filesystem walker for the listing generator

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A regular file found by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false, links are not listed)
    pub follow_symlinks: bool,
    /// Entry names to skip, together with everything below them
    pub ignore_names: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Number of entries the walker could not read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub unreadable: usize,
    pub ignored: usize,
}

pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect regular files in name order.
    ///
    /// Entries that cannot be read are logged and skipped; the walk itself
    /// never fails.
    pub fn walk(&self) -> (Vec<FileEntry>, WalkStats) {
        let mut files = Vec::new();
        let mut stats = WalkStats::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name();

        let ignore = &self.config.ignore_names;
        let mut iter = walker.into_iter();
        while let Some(entry) = iter.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(path = ?err.path(), error = %err, "Skipping unreadable entry");
                    stats.unreadable += 1;
                    continue;
                }
            };

            if entry.depth() > 0
                && ignore
                    .iter()
                    .any(|name| entry.file_name().to_string_lossy() == name.as_str())
            {
                debug!(path = ?entry.path(), "Ignoring entry");
                stats.ignored += 1;
                if entry.file_type().is_dir() {
                    iter.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(metadata) => files.push(FileEntry {
                    path: entry.into_path(),
                    size: metadata.len(),
                }),
                Err(err) => {
                    warn!(path = ?entry.path(), error = %err, "Failed to read metadata");
                    stats.unreadable += 1;
                }
            }
        }

        (files, stats)
    }
}
