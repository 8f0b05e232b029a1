//! Core type definitions for the Merkle airdrop library
//!
//! This module defines fundamental types used across multiple modules,
//! providing a common location for shared type definitions.

// ============================================================================
// Fundamental Types
// ============================================================================

/// Type alias for 32-byte arrays used across cryptographic operations
pub type Bytes32 = [u8; 32];

// ============================================================================
// Account Domain
// ============================================================================

/// Length of an account address in bytes
pub const ADDRESS_LEN: usize = 20;

/// Type alias for 20-byte account addresses
pub type Address = [u8; ADDRESS_LEN];

/// Type alias for token amounts
///
/// Amounts are packed as 256-bit big-endian words when hashed, so any
/// `u128` value produces the same bytes as a Solidity `uint256`.
pub type Amount = u128;

/// Width of the packed amount word in a leaf preimage
pub const AMOUNT_WORD_LEN: usize = 32;

// ============================================================================
// Commitment Domain
// ============================================================================

/// Type alias for tree leaves (hash of one entitlement)
pub type Leaf = Bytes32;

/// Type alias for root commitments
pub type MerkleRoot = Bytes32;

/// Length of a leaf preimage: packed address followed by packed amount
pub const LEAF_PREIMAGE_LEN: usize = ADDRESS_LEN + AMOUNT_WORD_LEN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_widths() {
        assert_eq!(std::mem::size_of::<Address>(), ADDRESS_LEN);
        assert_eq!(LEAF_PREIMAGE_LEN, 52);
        assert!(u128::BITS as usize / 8 <= AMOUNT_WORD_LEN);
    }
}
