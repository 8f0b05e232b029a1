//! Lock-guarded verifier handle for concurrent hosts
//!
//! Every operation takes the single lock for its whole duration, so claims
//! and root updates form one total order exactly as on a serializing host.

use std::sync::{Arc, Mutex, MutexGuard};

use super::ledger::{InMemoryLedger, Ledger};
use super::operation::{DistributorOperation, OperationOutcome};
use super::state::ClaimStatus;
use super::verifier::{ClaimReceipt, ClaimVerifier, RootUpdate};
use crate::commitment::{Keccak256Hasher, MerkleProof};
use crate::errors::DistributorError::StatePoisoned;
use crate::tree::TreeHasher;
use crate::types::{Address, Amount, MerkleRoot};
use crate::Result;

/// Cloneable, thread-safe handle to one [`ClaimVerifier`]
///
/// # Example
///
/// ```rust
/// use merkle_airdrop::distributor::{ClaimVerifier, SharedClaimVerifier};
///
/// let shared = SharedClaimVerifier::new(ClaimVerifier::new([1u8; 20], [0u8; 32]));
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.set_merkle_root([1u8; 20], [2u8; 32]))
///     .join()
///     .expect("thread should not panic")?;
/// assert_eq!(shared.merkle_root()?, [2u8; 32]);
/// # Ok::<(), merkle_airdrop::errors::Error>(())
/// ```
#[derive(Debug)]
pub struct SharedClaimVerifier<L = InMemoryLedger, H = Keccak256Hasher> {
    inner: Arc<Mutex<ClaimVerifier<L, H>>>,
}

impl<L, H> Clone for SharedClaimVerifier<L, H> {
    fn clone(&self) -> Self { Self { inner: Arc::clone(&self.inner) } }
}

impl<L: Ledger, H: TreeHasher> SharedClaimVerifier<L, H> {
    /// Wraps a verifier
    pub fn new(verifier: ClaimVerifier<L, H>) -> Self { Self { inner: Arc::new(Mutex::new(verifier)) } }

    fn lock(&self) -> Result<MutexGuard<'_, ClaimVerifier<L, H>>> {
        self.inner.lock().map_err(|_| StatePoisoned.into())
    }

    /// See [`ClaimVerifier::claim`]
    pub fn claim(&self, caller: Address, amount: Amount, proof: &MerkleProof) -> Result<ClaimReceipt> {
        self.lock()?.claim(caller, amount, proof)
    }

    /// See [`ClaimVerifier::set_merkle_root`]
    pub fn set_merkle_root(&self, caller: Address, new_root: MerkleRoot) -> Result<RootUpdate> {
        self.lock()?.set_merkle_root(caller, new_root)
    }

    /// See [`ClaimVerifier::apply`]
    pub fn apply(&self, operation: DistributorOperation) -> Result<OperationOutcome> {
        self.lock()?.apply(operation)
    }

    /// Current root commitment
    pub fn merkle_root(&self) -> Result<MerkleRoot> { Ok(self.lock()?.merkle_root()) }

    /// Claim status of `address`
    pub fn claim_status(&self, address: &Address) -> Result<ClaimStatus> {
        Ok(self.lock()?.claim_status(address))
    }

    /// Ledger balance of `address`
    pub fn balance_of(&self, address: &Address) -> Result<Amount> { Ok(self.lock()?.balance_of(address)) }

    /// Runs `f` against the locked verifier
    pub fn with<R>(&self, f: impl FnOnce(&ClaimVerifier<L, H>) -> R) -> Result<R> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::commitment::{build_tree, Entitlement};
    use crate::errors::{DistributorError, Error};
    use crate::tree::ProofProvider;

    #[test]
    fn test_concurrent_claims_same_address() {
        let alice = Entitlement::new([1u8; 20], 1000);
        let tree = build_tree(&[alice, Entitlement::new([2u8; 20], 2000)]).expect("tree should build");
        let proof = tree.get_proof(&alice).expect("proof should exist");
        let shared = SharedClaimVerifier::new(ClaimVerifier::new([9u8; 20], tree.root()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let proof = proof.clone();
                thread::spawn(move || shared.claim(alice.address, alice.amount, &proof))
            })
            .collect();
        let results: Vec<Result<ClaimReceipt>> =
            handles.into_iter().map(|h| h.join().expect("thread should not panic")).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
            r,
            Err(Error::Distributor(DistributorError::AlreadyClaimed(_)))
        )));
        assert_eq!(shared.balance_of(&alice.address).expect("lock should be healthy"), 1000);
        assert_eq!(
            shared.claim_status(&alice.address).expect("lock should be healthy"),
            ClaimStatus::Claimed
        );
    }

    #[test]
    fn test_poisoned_lock() {
        let shared = SharedClaimVerifier::new(ClaimVerifier::new([9u8; 20], [0u8; 32]));
        let handle = shared.clone();

        let _ = thread::spawn(move || {
            let _guard = handle.inner.lock();
            panic!("poison the verifier lock");
        })
        .join();

        assert_eq!(shared.merkle_root(), Err(Error::Distributor(DistributorError::StatePoisoned)));
    }

    #[test]
    fn test_with() {
        let shared = SharedClaimVerifier::new(ClaimVerifier::new([9u8; 20], [4u8; 32]));

        let (admin, root, claimed) = shared
            .with(|verifier| (verifier.admin(), verifier.merkle_root(), verifier.claimed_count()))
            .expect("lock should be healthy");

        assert_eq!(admin, [9u8; 20]);
        assert_eq!(root, [4u8; 32]);
        assert_eq!(claimed, 0);
    }
}
