//! Shared test utilities for integration tests

use culler::tree::Tree;
use std::sync::Mutex;

/// Serializes tests that change process environment variables
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Turn space-separated triples into a tab-separated listing
pub fn listing(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join("\t") + "\n")
        .collect()
}

pub fn hash_of(tree: &Tree, path: &str) -> [u8; 32] {
    let id = tree
        .lookup(path)
        .unwrap_or_else(|| panic!("no node at {}", path));
    tree.node(id).hash
}
