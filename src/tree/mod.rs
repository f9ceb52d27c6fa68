//! Path trie with content hashes
//!
//! Listings are ingested into a [`Tree`] where every node carries an aggregate
//! size, a file count and a hash derived from content only. Two subtrees with
//! the same hash hold the same content under the same relative names.

pub mod builder;
pub mod hasher;
pub mod listing;
pub mod node;

pub use builder::{build_tree, merge_trees, name_roots_alphabetically, TreeBuilder};
pub use node::{Tree, TreeNode};
