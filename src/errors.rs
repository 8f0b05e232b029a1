//! Error types for the Merkle airdrop library
//!
//! This module defines all error types used throughout the library,
//! providing detailed error information for debugging and handling.

use thiserror::Error;

use crate::types::{Address, Amount, Leaf, MerkleRoot};

/// The main error type for the Merkle airdrop library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Commitment builder errors
    #[error(transparent)]
    Commitment(#[from] CommitmentError),

    /// Claim verifier errors
    #[error(transparent)]
    Distributor(#[from] DistributorError),

    /// Ledger collaborator errors
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Distribution file errors
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

/// Errors raised by the commitment builder when its input is unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommitmentError {
    /// The entitlement list is empty
    #[error("Invalid input: entitlement list is empty")]
    EmptyEntitlements,

    /// The same address appears more than once in one generation
    #[error("Invalid input: duplicate address 0x{} in entitlement list", hex::encode(.0))]
    DuplicateAddress(Address),

    /// The entitled amounts sum past the maximum representable amount
    #[error("Invalid input: entitlement total overflows")]
    TotalOverflow,

    /// A proof was requested for an entitlement that is not in the tree
    #[error("Invalid input: entitlement 0x{} -> {amount} is not in the tree", hex::encode(.address))]
    EntitlementNotFound {
        /// The requested address
        address: Address,
        /// The requested amount
        amount: Amount,
    },

    /// A proof was requested for a leaf that is not in the tree
    #[error("Invalid input: leaf 0x{} is not in the tree", hex::encode(.0))]
    LeafNotFound(Leaf),
}

/// Errors raised by the claim verifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DistributorError {
    /// The caller has already claimed; permanent for this address
    #[error("Already claimed tokens: 0x{}", hex::encode(.0))]
    AlreadyClaimed(Address),

    /// The proof does not fold to the current root
    #[error("Could not verify merkle proof")]
    InvalidProof,

    /// A non-administrator invoked an administrative operation
    #[error("Unauthorized: 0x{} is not the administrator", hex::encode(.caller))]
    Unauthorized {
        /// The rejected caller
        caller: Address,
    },

    /// Crediting the claim would overflow the running claimed total
    #[error("Claimed total overflow: {total} + {amount}")]
    ClaimedTotalOverflow {
        /// The claimed total before this claim
        total: Amount,
        /// The amount being claimed
        amount: Amount,
    },

    /// A thread panicked while holding the shared verifier lock
    #[error("Verifier state lock is poisoned")]
    StatePoisoned,
}

/// Errors raised by the ledger collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerError {
    /// Crediting the account would overflow its balance
    #[error("Balance overflow for 0x{}: {balance} + {amount}", hex::encode(.owner))]
    BalanceOverflow {
        /// The account being credited
        owner: Address,
        /// The current balance
        balance: Amount,
        /// The amount to credit
        amount: Amount,
    },

    /// Minting would overflow the total supply
    #[error("Total supply overflow: {supply} + {amount}")]
    SupplyOverflow {
        /// The current total supply
        supply: Amount,
        /// The amount to mint
        amount: Amount,
    },
}

/// Errors raised while reading or writing distribution files
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DistributionError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(String),

    /// An entitlement record is not of the form `address,amount`
    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    /// Malformed hex value
    #[error("Invalid hex value: {0}")]
    InvalidHex(String),

    /// Malformed decimal amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A stored proof does not fold to the stored root
    #[error("Stored proof for 0x{} does not match root 0x{}", hex::encode(.address), hex::encode(.root))]
    RootMismatch {
        /// The address whose proof failed
        address: Address,
        /// The stored root
        root: MerkleRoot,
    },
}

impl From<std::io::Error> for DistributionError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}

impl From<serde_json::Error> for DistributionError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e.to_string()) }
}

/// Result type alias for Merkle airdrop operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let commitment: Error = CommitmentError::EmptyEntitlements.into();
        let distributor: Error = DistributorError::InvalidProof.into();
        let ledger: Error = LedgerError::SupplyOverflow { supply: 1, amount: 2 }.into();

        assert!(matches!(commitment, Error::Commitment(CommitmentError::EmptyEntitlements)));
        assert!(matches!(distributor, Error::Distributor(DistributorError::InvalidProof)));
        assert!(matches!(ledger, Error::Ledger(LedgerError::SupplyOverflow { .. })));
    }

    #[test]
    fn test_error_messages() {
        let already = DistributorError::AlreadyClaimed([0xabu8; 20]);
        let invalid = DistributorError::InvalidProof;

        assert_eq!(
            already.to_string(),
            "Already claimed tokens: 0xabababababababababababababababababababab"
        );
        assert_eq!(invalid.to_string(), "Could not verify merkle proof");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");

        let err: DistributionError = io.into();

        assert!(matches!(err, DistributionError::Io(msg) if msg.contains("missing")));
    }

    #[test]
    fn test_overflow_and_malformed_messages() {
        let overflow = DistributorError::ClaimedTotalOverflow { total: u128::MAX, amount: 1 };
        let malformed = DistributionError::MalformedEntry("no separator".to_string());

        assert_eq!(overflow.to_string(), format!("Claimed total overflow: {} + 1", u128::MAX));
        assert_eq!(malformed.to_string(), "Malformed entry: no separator");
    }
}
