//! Verifier operation types
//!
//! Operations are pure data describing one call into the verifier, so a
//! host can queue, log or replay a totally ordered stream of them and apply
//! each with [`ClaimVerifier::apply`].

use super::ledger::Ledger;
use super::verifier::{ClaimReceipt, ClaimVerifier, RootUpdate};
use crate::commitment::MerkleProof;
use crate::tree::TreeHasher;
use crate::types::{Address, Amount, MerkleRoot};
use crate::Result;

/// One call into the claim verifier
///
/// # Usage
///
/// ```rust
/// use merkle_airdrop::distributor::{ClaimVerifier, DistributorOperation, OperationOutcome};
///
/// let admin = [9u8; 20];
/// let mut verifier = ClaimVerifier::new(admin, [0u8; 32]);
/// let op = DistributorOperation::SetMerkleRoot { caller: admin, new_root: [1u8; 32] };
///
/// assert_eq!(op.caller(), admin);
/// assert!(matches!(verifier.apply(op)?, OperationOutcome::RootUpdated(_)));
/// # Ok::<(), merkle_airdrop::errors::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DistributorOperation {
    /// Claim an entitled amount with a membership proof
    Claim {
        /// Claiming address
        caller: Address,
        /// Entitled amount
        amount: Amount,
        /// Membership proof against the current root
        proof: MerkleProof,
    },

    /// Replace the root commitment (administrator only)
    SetMerkleRoot {
        /// Calling address
        caller: Address,
        /// Replacement root
        new_root: MerkleRoot,
    },
}

impl DistributorOperation {
    /// Returns the address issuing the operation
    pub fn caller(&self) -> Address {
        match self {
            Self::Claim { caller, .. } | Self::SetMerkleRoot { caller, .. } => *caller,
        }
    }
}

/// Successful result of an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationOutcome {
    /// A claim was credited
    Claimed(ClaimReceipt),
    /// The root was replaced
    RootUpdated(RootUpdate),
}

impl<L: Ledger, H: TreeHasher> ClaimVerifier<L, H> {
    /// Applies one operation
    ///
    /// # Errors
    /// Same as [`ClaimVerifier::claim`] and [`ClaimVerifier::set_merkle_root`]
    pub fn apply(&mut self, operation: DistributorOperation) -> Result<OperationOutcome> {
        match operation {
            DistributorOperation::Claim { caller, amount, proof } => {
                self.claim(caller, amount, &proof).map(OperationOutcome::Claimed)
            }
            DistributorOperation::SetMerkleRoot { caller, new_root } => {
                self.set_merkle_root(caller, new_root).map(OperationOutcome::RootUpdated)
            }
        }
    }
}
