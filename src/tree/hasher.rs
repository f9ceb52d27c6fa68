//! Hash computation for tree nodes using BLAKE3

use crate::types::Hash;
use blake3::Hasher;

/// Hash of a file node, derived only from the listing signature.
///
/// Name and path never enter the hash, so equal content under different names
/// compares equal.
pub fn signature_hash(signature: &str) -> Hash {
    let mut hasher = Hasher::new();

    // Hash type discriminator
    hasher.update(b"file");
    hasher.update(signature.as_bytes());

    *hasher.finalize().as_bytes()
}

/// Hash of a directory node from its children's hashes.
///
/// Children must be given in name order. A single child bubbles its hash up
/// unchanged; otherwise the hash is
/// `hash("directory" || children_count || child_hash...)`.
pub fn directory_hash(children: &[Hash]) -> Hash {
    if let [only] = children {
        return *only;
    }

    let mut hasher = Hasher::new();

    // Hash type discriminator
    hasher.update(b"directory");

    // Hash children count (8 bytes, big-endian)
    hasher.update(&(children.len() as u64).to_be_bytes());

    for child in children {
        hasher.update(child);
    }

    *hasher.finalize().as_bytes()
}

/// Compute content hash for file bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}
