//! Merkle proof verification

use super::entitlement::Entitlement;
use super::hasher::DEFAULT_HASHER;
use super::types::MerkleProof;
use crate::tree::TreeHasher;
use crate::types::{Bytes32, Leaf, MerkleRoot};

/// Folds a proof into a leaf, returning the implied root
///
/// At each step `current = hash_pair(current, sibling)`; the default hasher
/// orders the pair by value, so only sibling hashes are needed.
pub fn process_proof(leaf: Leaf, proof: &MerkleProof) -> Bytes32 {
    process_proof_with(leaf, proof, &DEFAULT_HASHER)
}

/// Folds a proof into a leaf with a custom hasher
pub fn process_proof_with<H: TreeHasher>(leaf: Leaf, proof: &MerkleProof, hasher: &H) -> Bytes32 {
    proof.path.iter().fold(leaf, |current, sibling| hasher.hash_pair(current, *sibling))
}

/// Verifies a merkle inclusion proof
///
/// # Arguments
/// * `leaf` - The leaf being proven
/// * `proof` - Sibling hashes from leaf to root
/// * `root` - The expected root commitment
///
/// # Returns
/// `true` if the proof folds to `root`
///
/// # Example
///
/// ```rust
/// use merkle_airdrop::commitment::{build_tree, verify_merkle_proof, Entitlement};
/// use merkle_airdrop::tree::ProofProvider;
///
/// let alice = Entitlement::new([1u8; 20], 1000);
/// let bob = Entitlement::new([2u8; 20], 2000);
/// let tree = build_tree(&[alice, bob])?;
/// let proof = tree.get_proof(&alice)?;
///
/// assert!(verify_merkle_proof(alice.leaf(), &proof, tree.root()));
/// assert!(!verify_merkle_proof(Entitlement::new([1u8; 20], 5000).leaf(), &proof, tree.root()));
/// # Ok::<(), merkle_airdrop::errors::Error>(())
/// ```
pub fn verify_merkle_proof(leaf: Leaf, proof: &MerkleProof, root: MerkleRoot) -> bool {
    verify_merkle_proof_with(leaf, proof, root, &DEFAULT_HASHER)
}

/// Verifies a merkle inclusion proof with a custom hasher
pub fn verify_merkle_proof_with<H: TreeHasher>(
    leaf: Leaf,
    proof: &MerkleProof,
    root: MerkleRoot,
    hasher: &H,
) -> bool {
    process_proof_with(leaf, proof, hasher) == root
}

/// Verifies that `entitlement` is committed to by `root`
pub fn verify_entitlement(entitlement: &Entitlement, proof: &MerkleProof, root: MerkleRoot) -> bool {
    verify_merkle_proof(entitlement.leaf(), proof, root)
}
