//! CLI parse: clap types for culler. No behavior; definitions only.

use crate::listing::HashMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// culler - find duplicated directory trees and decide which copies to keep
#[derive(Parser, Debug)]
#[command(name = "culler")]
#[command(about = "Find duplicated directory trees in filesystem listings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a directory and print a listing
    List {
        /// Directory to list
        dir: PathBuf,
        /// Signature strategy (defaults to listing.hash_mode from config)
        #[arg(long, value_enum)]
        hash: Option<HashMode>,
        /// Bytes hashed by the sample strategy
        #[arg(long)]
        sample_size: Option<u64>,
        /// Follow symbolic links while walking
        #[arg(long)]
        follow_symlinks: bool,
        /// Skip entries with this name and everything below them
        #[arg(long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,
        /// Descend at most this many directory levels
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Report duplicated and unique subtrees of one or more listings
    Analyze {
        #[command(flatten)]
        input: ListingArgs,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: AnalyzeFormat,
    },
    /// Write an initial keep-everything manifest of duplicate groups
    Manifest {
        #[command(flatten)]
        input: ListingArgs,
        /// Also list duplicate groups made of single files
        #[arg(long)]
        include_files: bool,
        /// Write the manifest to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rewrite a manifest with a rule script
    Apply {
        /// Manifest to rewrite
        #[arg(short, long)]
        manifest: PathBuf,
        /// Rule script
        #[arg(short, long)]
        script: PathBuf,
        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that every hash group of a manifest keeps at least one copy
    Verify {
        /// Manifest to check
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Listing inputs shared by `analyze` and `manifest`
#[derive(clap::Args, Debug, Clone)]
pub struct ListingArgs {
    /// Listing files
    #[arg(short, long = "listing", required = true, num_args = 1..)]
    pub listings: Vec<PathBuf>,
    /// Load every listing as its own tree and merge them under a, b, c...
    #[arg(long)]
    pub merge: bool,
    /// Keep entries whose names are on the ignore list
    #[arg(long)]
    pub no_ignore: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeFormat {
    Text,
    Table,
    Json,
}
