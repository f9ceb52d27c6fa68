//! Error types for listing ingestion, the rule language and manifest handling.

use std::path::PathBuf;
use thiserror::Error;

/// Listing ingestion errors. Every variant is fatal to the current load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: expected 3 tab-separated columns, got {columns}: `{text}`")]
    BadColumnCount {
        line: usize,
        columns: usize,
        text: String,
    },

    #[error("line {line}: invalid size `{value}`: {source}")]
    BadSize {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("line {line}: empty file name in `{path}`")]
    EmptyFileName { line: usize, path: String },

    #[error("line {line}: `{path}` is used both as a file and as a directory")]
    PathConflict { line: usize, path: String },

    #[error("total size of `{0}` overflows 64 bits")]
    SizeOverflow(String),

    #[error("Cannot merge trees with the same top-level name '{0}', consider renaming")]
    DuplicateRootName(String),

    #[error("Cannot name {count} roots, at most {max} are supported")]
    TooManyRoots { count: usize, max: usize },

    #[error("Listing I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A parse failure at a byte offset of the parsed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at offset {position})")]
pub struct SyntaxError {
    pub position: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script line {line}, column {column}: {message}\n    {text}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
        text: String,
    },
}

/// Rule evaluation errors. All of them abort the whole manifest transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("single instruction \"{instruction}\" produced contradictory actions for: {}", .entries.join(", "))]
    ContradictoryActions {
        instruction: String,
        entries: Vec<String>,
    },

    #[error("single manifest entry matched contradictory instructions:\n{entry}\n{}", .instructions.join("\n"))]
    ContradictoryInstructions {
        entry: String,
        instructions: Vec<String>,
    },

    #[error("hash group for {expected} contains an entry with hash {found}: `{path}`")]
    MixedHashGroup {
        expected: String,
        found: String,
        path: String,
    },
}

/// Manifest parsing and boundary invariant errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("illegal manifest line {line}: '{text}'")]
    IllegalLine { line: usize, text: String },

    #[error("nodes reported as duplicates of {hash} have different sizes or file counts: {}", .paths.join(", "))]
    InconsistentGroup { hash: String, paths: Vec<String> },

    #[error("there must be at least one \"keep\" for each hash, none for: {}", .hashes.join(", "))]
    NoKeep { hashes: Vec<String> },
}

/// Top-level error returned by CLI-facing operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to load listing: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to parse script: {0}")]
    Script(#[from] ScriptError),

    #[error("Rule evaluation failed: {0}")]
    Rule(#[from] RuleError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
