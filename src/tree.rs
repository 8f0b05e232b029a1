//! Merkle tree traits and abstractions
//!
//! This module defines traits for extensible tree implementations, allowing
//! different hash functions and tree shapes to be used while maintaining a
//! consistent interface between the off-chain builder and the verifier.

use crate::commitment::{Entitlement, MerkleProof};
use crate::types::{Address, Amount, Bytes32, Leaf};

/// How a trailing unpaired node is carried to the next level
///
/// The two policies produce different roots and are not interchangeable:
/// proofs must be generated under the same policy that produced the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OddNodePolicy {
    /// The unpaired node moves up unchanged and contributes no proof element
    #[default]
    Promote,
    /// The unpaired node is hashed with itself and is its own sibling
    Duplicate,
}

/// Trait for hash functions used by the tree
///
/// # Example
///
/// ```rust
/// use merkle_airdrop::tree::TreeHasher;
/// use merkle_airdrop::types::{Address, Amount, Bytes32};
///
/// struct XorHasher;
///
/// impl TreeHasher for XorHasher {
///     fn hash_leaf(&self, address: &Address, amount: Amount) -> Bytes32 {
///         let mut out = [0u8; 32];
///         out[..20].copy_from_slice(address);
///         out[16..].iter_mut().zip(amount.to_be_bytes()).for_each(|(o, b)| *o ^= b);
///         out
///     }
///
///     fn hash_pair(&self, a: Bytes32, b: Bytes32) -> Bytes32 {
///         let mut out = [0u8; 32];
///         out.iter_mut().zip(a.iter().zip(b.iter())).for_each(|(o, (x, y))| *o = x ^ y);
///         out
///     }
/// }
/// ```
pub trait TreeHasher {
    /// Computes the leaf for one entitlement
    ///
    /// Builder and verifier must agree on the encoding width and byte order
    /// of `address` and `amount`, or proofs will never verify.
    fn hash_leaf(&self, address: &Address, amount: Amount) -> Leaf;

    /// Computes the parent of two nodes
    ///
    /// Implementations must be symmetric (`hash_pair(a, b) == hash_pair(b, a)`)
    /// so that proofs carry no left/right position information.
    fn hash_pair(&self, a: Bytes32, b: Bytes32) -> Bytes32;
}

/// Trait for tree shape parameters
pub trait TreeConfig {
    /// Whether leaves are sorted ascending before the tree is built
    ///
    /// Sorting makes the root independent of input order.
    fn sort_leaves(&self) -> bool;

    /// How a trailing unpaired node is handled at each level
    fn odd_node_policy(&self) -> OddNodePolicy;
}

/// Provides membership proofs for entitlements of one generation
pub trait ProofProvider {
    /// Returns the root commitment of the generation
    fn root(&self) -> Bytes32;

    /// Returns the membership proof for `entitlement`
    ///
    /// # Errors
    /// * `Err(Error::Commitment(CommitmentError::EntitlementNotFound))` - If the entitlement is not in the tree
    fn get_proof(&self, entitlement: &Entitlement) -> crate::errors::Result<MerkleProof>;
}
