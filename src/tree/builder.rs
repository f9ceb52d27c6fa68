//! Tree builder for constructing path tries from listings

use crate::error::LoadError;
use crate::tree::hasher;
use crate::tree::listing::{trim_line, ListingLine};
use crate::tree::node::Tree;
use crate::types::{hash_to_hex, NodeId};
use std::collections::{BTreeSet, HashSet};
use std::io::BufRead;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Letters used to name the roots of merged trees
const ROOT_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Builds a [`Tree`] from listing lines
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    ignored_names: BTreeSet<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every listing line that has one of `names` as a path segment
    pub fn with_ignored_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build_from_str(&self, text: &str) -> Result<Tree, LoadError> {
        self.build_from_reader(text.as_bytes())
    }

    /// Build the tree from a listing stream.
    ///
    /// Sizes and hashes are only valid once the whole stream has been consumed.
    #[instrument(skip_all, fields(ignored_names = self.ignored_names.len()))]
    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> Result<Tree, LoadError> {
        let start = Instant::now();
        let mut state = BuildState {
            tree: Tree::new(),
            files: HashSet::new(),
        };
        let mut ignored = 0usize;
        let mut ingested = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = trim_line(&line);
            if line.is_empty() {
                // Concatenated listings often leave blank lines between files.
                continue;
            }
            let parsed = ListingLine::parse(index + 1, line)?;
            if self.ingest(&mut state, index + 1, &parsed)? {
                ingested += 1;
            } else {
                ignored += 1;
            }
        }

        let mut tree = state.tree;
        tree.update_values()?;

        let root = tree.node(tree.root());
        info!(
            files = ingested,
            ignored,
            total_size = root.size,
            root_hash = %hash_to_hex(&root.hash),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );
        Ok(tree)
    }

    /// Returns false when the line was discarded by the ignore set
    fn ingest(
        &self,
        state: &mut BuildState,
        line_no: usize,
        line: &ListingLine<'_>,
    ) -> Result<bool, LoadError> {
        let segments: Vec<&str> = line.path.split('/').collect();

        if let Some(hit) = segments
            .iter()
            .find(|segment| self.ignored_names.contains(**segment))
        {
            debug!(path = line.path, name = *hit, "Ignoring listing line");
            return Ok(false);
        }

        let Some((file_name, directories)) = segments.split_last() else {
            return Err(LoadError::EmptyFileName {
                line: line_no,
                path: line.path.to_string(),
            });
        };
        if file_name.is_empty() {
            return Err(LoadError::EmptyFileName {
                line: line_no,
                path: line.path.to_string(),
            });
        }

        let conflict = || LoadError::PathConflict {
            line: line_no,
            path: line.path.to_string(),
        };

        let mut current = state.tree.root();
        for segment in directories.iter().filter(|s| !s.is_empty()) {
            current = match state.tree.child(current, segment) {
                Some(existing) if state.files.contains(&existing) => return Err(conflict()),
                Some(existing) => existing,
                None => state.tree.add_child(current, segment),
            };
        }

        let hash = hasher::signature_hash(line.signature);
        let leaf = match state.tree.child(current, file_name) {
            Some(existing) if !state.files.contains(&existing) => return Err(conflict()),
            Some(existing) => {
                warn!(path = line.path, line = line_no, "Duplicate listing path, keeping the last entry");
                existing
            }
            None => state.tree.add_child(current, file_name),
        };
        state.tree.set_file(leaf, line.size, hash);
        state.files.insert(leaf);
        Ok(true)
    }
}

struct BuildState {
    tree: Tree,
    files: HashSet<NodeId>,
}

/// Build a tree from listing text, ignoring lines that contain any of `ignored_names`
pub fn build_tree(text: &str, ignored_names: &[String]) -> Result<Tree, LoadError> {
    TreeBuilder::new()
        .with_ignored_names(ignored_names.iter().cloned())
        .build_from_str(text)
}

/// Merge independently built trees under a fresh unnamed root.
///
/// Each tree's root becomes a child of the new root under the name it carries,
/// so callers must give the roots distinct names first.
pub fn merge_trees(trees: Vec<Tree>) -> Result<Tree, LoadError> {
    let mut merged = Tree::new();
    let root = merged.root();
    let mut names = BTreeSet::new();

    for tree in trees {
        let name = tree.node(tree.root()).name.clone();
        if !names.insert(name.clone()) {
            return Err(LoadError::DuplicateRootName(name));
        }
        merged.graft(root, tree);
    }

    merged.update_values()?;
    debug!(roots = names.len(), nodes = merged.len(), "Merged trees");
    Ok(merged)
}

/// Name roots `a`, `b`, `c`, ... in order. A single tree keeps its unnamed root.
pub fn name_roots_alphabetically(trees: &mut [Tree]) -> Result<(), LoadError> {
    if trees.len() == 1 {
        return Ok(());
    }
    if trees.len() > ROOT_LETTERS.len() {
        return Err(LoadError::TooManyRoots {
            count: trees.len(),
            max: ROOT_LETTERS.len(),
        });
    }
    for (tree, letter) in trees.iter_mut().zip(ROOT_LETTERS.chars()) {
        tree.rename_root(&letter.to_string());
    }
    Ok(())
}
