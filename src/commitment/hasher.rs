//! Hasher implementations for tree operations

use crate::tree::TreeHasher;
use crate::types::{Address, Amount, Bytes32, Leaf};
use crate::utils::{hash_sorted_pair, keccak256, leaf_preimage};

/// Keccak-256 hasher implementation
///
/// Leaves are `keccak256(address ++ uint256(amount))`, byte-identical to
/// Solidity's `keccak256(abi.encodePacked(address, uint256))`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256Hasher;

impl TreeHasher for Keccak256Hasher {
    fn hash_leaf(&self, address: &Address, amount: Amount) -> Leaf {
        keccak256(&leaf_preimage(address, amount))
    }

    fn hash_pair(&self, a: Bytes32, b: Bytes32) -> Bytes32 { hash_sorted_pair(a, b) }
}

/// Default hasher instance (Keccak-256)
pub(crate) const DEFAULT_HASHER: Keccak256Hasher = Keccak256Hasher;
