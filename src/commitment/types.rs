//! Type definitions for commitment operations

use crate::types::Bytes32;
use crate::utils::hex_encode;

/// Merkle inclusion proof for an entitlement
///
/// The proof consists of sibling hashes along the path from the leaf to the
/// root. Levels where the path node was promoted unpaired contribute nothing,
/// so the proof may be shorter than the tree depth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MerkleProof {
    /// Sibling hashes in traversal order, leaf level first
    pub path: Vec<Bytes32>,
}

impl MerkleProof {
    /// Creates a proof from a sibling path
    pub fn new(path: Vec<Bytes32>) -> Self { Self { path } }

    /// Number of sibling hashes
    pub fn len(&self) -> usize { self.path.len() }

    /// Whether the proof has no siblings (single-leaf tree)
    pub fn is_empty(&self) -> bool { self.path.is_empty() }

    /// Sibling hashes as `0x`-prefixed hex strings
    pub fn to_hex(&self) -> Vec<String> { self.path.iter().map(hex_encode).collect() }
}

impl From<Vec<Bytes32>> for MerkleProof {
    fn from(path: Vec<Bytes32>) -> Self { Self { path } }
}
