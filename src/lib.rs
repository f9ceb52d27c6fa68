//! culler: find duplicated directory trees in filesystem listings
//!
//! A listing (`<path>\t<size>\t<signature>` per file) is folded into a hashed
//! path trie. Every node is classified on a five-state duplication lattice,
//! duplicate groups are written out as a keep/move manifest, and a small rule
//! language rewrites that manifest before anything is moved.

pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod manifest;
pub mod rules;
pub mod similarity;
pub mod tree;
pub mod types;
