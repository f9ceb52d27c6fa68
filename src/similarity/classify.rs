//! Bottom-up similarity classification

use crate::similarity::index::HashIndex;
use crate::similarity::state::SimilarityState;
use crate::tree::Tree;
use crate::types::NodeId;
use std::time::Instant;
use tracing::{info, warn};

/// Per-node similarity state plus the index it was derived from
#[derive(Debug, Clone)]
pub struct Classification {
    states: Vec<SimilarityState>,
    index: HashIndex,
}

impl Classification {
    pub fn state(&self, id: NodeId) -> SimilarityState {
        self.states
            .get(id)
            .copied()
            .unwrap_or(SimilarityState::Unknown)
    }

    /// Nodes indexed under the node's hash, sorted by full path.
    ///
    /// For a `FullDuplicate` this is the duplicate group. For any other state it
    /// holds the node itself, or its same-hash descendant when the node is hidden.
    pub fn group<'a>(&'a self, tree: &Tree, id: NodeId) -> &'a [NodeId] {
        self.index.group(&tree.node(id).hash)
    }

    pub fn index(&self) -> &HashIndex {
        &self.index
    }

    /// Node count per state, in lattice order
    pub fn counts(&self) -> [(SimilarityState, usize); 5] {
        let mut counts = [
            (SimilarityState::FullDuplicate, 0),
            (SimilarityState::WeakDuplicate, 0),
            (SimilarityState::PartiallyUnique, 0),
            (SimilarityState::Unique, 0),
            (SimilarityState::Unknown, 0),
        ];
        for state in &self.states {
            if let Some(slot) = counts.iter_mut().find(|(s, _)| s == state) {
                slot.1 += 1;
            }
        }
        counts
    }
}

/// Classify every node of `tree`. Children are always decided before parents.
pub fn classify(tree: &Tree) -> Classification {
    let start = Instant::now();
    let index = HashIndex::build(tree);
    let mut states = vec![SimilarityState::Unknown; tree.len()];

    for id in tree.preorder().into_iter().rev() {
        states[id] = classify_node(tree, &index, &states, id);
    }

    let classification = Classification { states, index };
    info!(
        nodes = tree.len(),
        hashes = classification.index.len(),
        duplicate_groups = classification.index.duplicate_groups().count(),
        duration_ms = start.elapsed().as_millis(),
        "Classification completed"
    );
    classification
}

fn classify_node(
    tree: &Tree,
    index: &HashIndex,
    states: &[SimilarityState],
    id: NodeId,
) -> SimilarityState {
    if index.group(&tree.node(id).hash).len() > 1 {
        return SimilarityState::FullDuplicate;
    }
    if tree.is_file(id) {
        return SimilarityState::Unique;
    }

    let child_states: Vec<SimilarityState> = tree.children(id).map(|c| states[c]).collect();
    let all = |pred: fn(SimilarityState) -> bool| child_states.iter().all(|s| pred(*s));
    let any = |pred: fn(SimilarityState) -> bool| child_states.iter().any(|s| pred(*s));

    if all(SimilarityState::is_duplicate) {
        SimilarityState::WeakDuplicate
    } else if all(|s| s == SimilarityState::Unique) {
        SimilarityState::Unique
    } else if all(SimilarityState::is_unique) {
        SimilarityState::PartiallyUnique
    } else if any(SimilarityState::is_duplicate)
        && any(SimilarityState::is_unique)
        && !any(|s| s == SimilarityState::Unknown)
    {
        SimilarityState::PartiallyUnique
    } else {
        warn!(path = tree.full_path(id), "Unknown similarity state");
        SimilarityState::Unknown
    }
}
