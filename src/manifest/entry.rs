//! Manifest lines: `<keep|move>\t<hash>\t<path>`

use crate::error::ManifestError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref MANIFEST_LINE_RE: Regex =
        Regex::new(r"^(keep|move)\t(\S+)\t(.+)$").expect("valid manifest line regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Keep,
    Move,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Keep => "keep",
            Operation::Move => "move",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(Operation::Keep),
            "move" => Ok(Operation::Move),
            other => Err(format!("unknown operation `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub operation: Operation,
    pub hash: String,
    pub path: String,
}

impl ManifestEntry {
    pub fn new(operation: Operation, hash: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            operation,
            hash: hash.into(),
            path: path.into(),
        }
    }

    /// Parse one line without its terminator, `None` if it is not an entry
    pub fn parse(line: &str) -> Option<Self> {
        let caps = MANIFEST_LINE_RE.captures(line)?;
        let operation = caps.get(1)?.as_str().parse().ok()?;
        Some(Self {
            operation,
            hash: caps.get(2)?.as_str().to_string(),
            path: caps.get(3)?.as_str().to_string(),
        })
    }

    pub fn with_operation(&self, operation: Operation) -> Self {
        Self {
            operation,
            ..self.clone()
        }
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.operation, self.hash, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    Entry(ManifestEntry),
    /// Comment or blank line, kept verbatim
    Passthrough(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub lines: Vec<ManifestLine>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse manifest text. Lines starting with `#` and blank lines pass
    /// through; every other line must be an entry.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut lines = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                lines.push(ManifestLine::Passthrough(raw.to_string()));
                continue;
            }
            // Trailing whitespace belongs to the path.
            let entry = ManifestEntry::parse(raw.trim_start()).ok_or_else(|| ManifestError::IllegalLine {
                line: index + 1,
                text: raw.to_string(),
            })?;
            lines.push(ManifestLine::Entry(entry));
        }
        Ok(Self { lines })
    }

    /// Render every line followed by a newline
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                ManifestLine::Entry(entry) => out.push_str(&entry.to_string()),
                ManifestLine::Passthrough(text) => out.push_str(text),
            }
            out.push('\n');
        }
        out
    }

    pub fn push_entry(&mut self, entry: ManifestEntry) {
        self.lines.push(ManifestLine::Entry(entry));
    }

    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.lines.push(ManifestLine::Passthrough(comment.into()));
    }

    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.lines.iter().filter_map(|line| match line {
            ManifestLine::Entry(entry) => Some(entry),
            ManifestLine::Passthrough(_) => None,
        })
    }

    /// Entries keyed by hash, each group in manifest order
    pub fn hash_groups(&self) -> BTreeMap<&str, Vec<&ManifestEntry>> {
        let mut groups: BTreeMap<&str, Vec<&ManifestEntry>> = BTreeMap::new();
        for entry in self.entries() {
            groups.entry(entry.hash.as_str()).or_default().push(entry);
        }
        groups
    }

    /// Every hash group must keep at least one copy
    pub fn verify_keeps(&self) -> Result<(), ManifestError> {
        let hashes: Vec<String> = self
            .hash_groups()
            .into_iter()
            .filter(|(_, group)| !group.iter().any(|e| e.operation == Operation::Keep))
            .map(|(hash, _)| hash.to_string())
            .collect();
        if hashes.is_empty() {
            Ok(())
        } else {
            Err(ManifestError::NoKeep { hashes })
        }
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
