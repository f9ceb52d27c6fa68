//! Hash index over tree nodes

use crate::tree::Tree;
use crate::types::{Hash, NodeId};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Nodes grouped by hash, each group sorted by full path.
///
/// A node is hidden (left out of the index) when one of its direct children
/// has the same hash. For `a/b/f` with `a` and `b` holding nothing else, only
/// `f` is indexed, so the chain does not report itself as duplicates.
#[derive(Debug, Clone, Default)]
pub struct HashIndex {
    groups: BTreeMap<Hash, Vec<NodeId>>,
    hidden: HashSet<NodeId>,
}

impl HashIndex {
    pub fn build(tree: &Tree) -> Self {
        let mut index = HashIndex::default();
        for id in tree.preorder() {
            if tree.has_child_with_same_hash(id) {
                debug!(path = tree.full_path(id), "Hiding node with a same-hash child");
                index.hidden.insert(id);
                continue;
            }
            index.groups.entry(tree.node(id).hash).or_default().push(id);
        }
        for group in index.groups.values_mut() {
            group.sort_by(|a, b| tree.full_path(*a).cmp(tree.full_path(*b)));
        }
        index
    }

    /// Indexed nodes with this hash; empty when no node carries it
    pub fn group(&self, hash: &Hash) -> &[NodeId] {
        self.groups.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.hidden.contains(&id)
    }

    /// Number of distinct hashes
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups with at least two members, in hash order
    pub fn duplicate_groups(&self) -> impl Iterator<Item = (&Hash, &[NodeId])> {
        self.groups
            .iter()
            .filter(|(_, group)| group.len() > 1)
            .map(|(hash, group)| (hash, group.as_slice()))
    }
}
