//! Arena-backed path trie.
//!
//! Every node is owned by the [`Tree`] arena; parent links are plain indices and
//! only serve to reconstruct full paths. A node without children is a file.

use crate::error::LoadError;
use crate::tree::hasher;
use crate::types::{Hash, NodeId};
use std::cell::OnceCell;
use std::collections::BTreeMap;

/// A file or directory in the merged namespace
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Path segment; empty only for the synthetic root
    pub name: String,
    /// Size in bytes (aggregate for directories)
    pub size: u64,
    /// Number of files in the subtree (1 for a file)
    pub file_count: u64,
    /// Content hash
    pub hash: Hash,
    /// Children keyed by name; iteration order is name order
    pub children: BTreeMap<String, NodeId>,
    /// Parent index, `None` for the root
    pub parent: Option<NodeId>,
    /// True only for the synthetic top-level node
    pub is_root: bool,
    full_path: OnceCell<String>,
}

impl TreeNode {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            size: 0,
            file_count: 0,
            hash: [0u8; 32],
            children: BTreeMap::new(),
            parent,
            is_root: false,
            full_path: OnceCell::new(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.children.is_empty()
    }
}

/// Path trie built from a listing
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only the synthetic, unnamed root
    pub fn new() -> Self {
        let mut root = TreeNode::new("", None);
        root.is_root = true;
        root.hash = hasher::directory_hash(&[]);
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Number of nodes, including the synthetic root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[self.root].children.is_empty()
    }

    pub fn is_file(&self, id: NodeId) -> bool {
        self.nodes[id].is_file()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Children of a node in name order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id].children.values().copied()
    }

    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[id].children.get(name).copied()
    }

    /// True when some direct child carries exactly the node's hash
    pub fn has_child_with_same_hash(&self, id: NodeId) -> bool {
        let hash = self.nodes[id].hash;
        self.children(id).any(|child| self.nodes[child].hash == hash)
    }

    /// Full path of a node, memoized.
    ///
    /// Segments are joined with `/` starting at the root; directories carry a
    /// trailing `/`.
    pub fn full_path(&self, id: NodeId) -> &str {
        self.nodes[id]
            .full_path
            .get_or_init(|| self.compute_full_path(id))
    }

    fn compute_full_path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(n) = current {
            parts.push(self.nodes[n].name.as_str());
            current = self.nodes[n].parent;
        }
        parts.reverse();
        if !self.is_file(id) {
            parts.push("");
        }
        parts.join("/")
    }

    /// Find a node by a `/`-separated path relative to the root.
    ///
    /// Empty segments are skipped, so `a/b`, `/a/b` and `/a/b/` all resolve to
    /// the same node.
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        let mut current = self.root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self.child(current, segment)?;
        }
        Some(current)
    }

    /// All node ids in pre-order, children visited in name order
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            // Reverse so that the smallest name is popped first.
            stack.extend(self.nodes[id].children.values().rev().copied());
        }
        order
    }

    /// Give the synthetic root a name so the tree can be merged under another root
    pub fn rename_root(&mut self, name: &str) {
        self.nodes[self.root].name = name.to_string();
        self.clear_path_cache();
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode::new(name, Some(parent)));
        self.nodes[parent].children.insert(name.to_string(), id);
        id
    }

    pub(crate) fn set_file(&mut self, id: NodeId, size: u64, hash: Hash) {
        let node = &mut self.nodes[id];
        node.size = size;
        node.file_count = 1;
        node.hash = hash;
    }

    /// Move every node of `other` into this arena and attach its root under `parent`
    pub(crate) fn graft(&mut self, parent: NodeId, other: Tree) {
        let offset = self.nodes.len();
        let other_root = other.root;
        for (index, mut node) in other.nodes.into_iter().enumerate() {
            node.parent = if index == other_root {
                Some(parent)
            } else {
                node.parent.map(|p| p + offset)
            };
            for child in node.children.values_mut() {
                *child += offset;
            }
            node.is_root = false;
            node.full_path = OnceCell::new();
            self.nodes.push(node);
        }
        let name = self.nodes[other_root + offset].name.clone();
        self.nodes[parent].children.insert(name, other_root + offset);
    }

    /// Recompute aggregate sizes, file counts and directory hashes bottom-up
    pub(crate) fn update_values(&mut self) -> Result<(), LoadError> {
        let order = self.preorder();

        for &id in order.iter().rev() {
            if self.nodes[id].is_file() {
                continue;
            }
            let mut size = 0u64;
            let mut file_count = 0u64;
            for child in self.children(id) {
                let c = &self.nodes[child];
                size = size
                    .checked_add(c.size)
                    .ok_or_else(|| LoadError::SizeOverflow(self.full_path(id).to_string()))?;
                file_count += c.file_count;
            }
            let node = &mut self.nodes[id];
            node.size = size;
            node.file_count = file_count;
        }

        for &id in order.iter().rev() {
            if self.nodes[id].is_file() && !self.nodes[id].is_root {
                continue;
            }
            let child_hashes: Vec<Hash> = self
                .children(id)
                .map(|child| self.nodes[child].hash)
                .collect();
            self.nodes[id].hash = hasher::directory_hash(&child_hashes);
        }
        Ok(())
    }

    fn clear_path_cache(&mut self) {
        for node in &mut self.nodes {
            node.full_path = OnceCell::new();
        }
    }
}
