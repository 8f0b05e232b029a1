//! Commitment construction and proof verification
//!
//! This module builds the binary hash tree over one generation of
//! entitlements, producing the root commitment and membership proofs, and
//! provides the pure verification routine shared with the claim verifier.
//! Sibling pairs are always hashed in sorted order, so a proof is just the
//! list of sibling hashes from leaf to root.

mod builder;
mod config;
mod entitlement;
mod hasher;
mod proof;
mod types;

pub use builder::{build_tree, build_tree_with, DistributionTree};
pub use config::{DuplicateOddConfig, SortedPairConfig};
pub use entitlement::Entitlement;
pub use hasher::Keccak256Hasher;
pub use proof::{
    process_proof, process_proof_with, verify_entitlement, verify_merkle_proof,
    verify_merkle_proof_with,
};
pub use types::MerkleProof;
