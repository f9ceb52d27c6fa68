//! Shared identifier and digest types.

/// 32-byte BLAKE3 digest identifying node content.
pub type Hash = [u8; 32];

/// Index of a node inside a [`crate::tree::Tree`] arena.
pub type NodeId = usize;

/// Hex rendering used wherever a hash leaves the process (manifests, reports).
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}
