//! Keep/move manifests
//!
//! A manifest lists every member of every duplicate group with the operation
//! to perform on it. The writer produces one with every member kept; rule
//! scripts then turn some of them into moves.

pub mod entry;
pub mod writer;

pub use entry::{Manifest, ManifestEntry, ManifestLine, Operation};
pub use writer::{format_bytes, write_manifest, ManifestSummary};
