#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Merkle Airdrop
//!
//! A Rust library for Merkle-committed token distributions with
//! exactly-once claims.

// Commitment construction and proof verification
pub mod commitment;

// Persisted builder output and entitlement list parsing
pub mod distribution;

// Claim verifier state machine
pub mod distributor;

// Error types
pub mod errors;

// Tree hashing and shape configuration traits
pub mod tree;

// Core type aliases and constants
pub mod types;

// Hashing, encoding and parsing helpers
pub mod utils;

// Re-export commonly used types and functions
pub use commitment::{build_tree, verify_entitlement, verify_merkle_proof, DistributionTree};
pub use commitment::{Entitlement, MerkleProof};
pub use distribution::DistributionFile;
pub use distributor::{ClaimStatus, ClaimVerifier, SharedClaimVerifier};
pub use errors::{Error, Result};
pub use types::{Address, Amount, Bytes32, MerkleRoot};
