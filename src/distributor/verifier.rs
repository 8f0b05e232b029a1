//! Claim verifier state machine
//!
//! Holds the current root commitment, the administrator identity, the claim
//! records and the ledger collaborator. All mutations take `&mut self`, so a
//! single owner serializes every call and the ledger, owned by the verifier,
//! has no path back into it while a claim is in flight.

use tracing::{debug, info, warn};

use super::ledger::{InMemoryLedger, Ledger};
use super::state::{ClaimRecords, ClaimStatus};
use crate::commitment::{verify_merkle_proof_with, Entitlement, Keccak256Hasher, MerkleProof};
use crate::errors::DistributorError::{AlreadyClaimed, ClaimedTotalOverflow, InvalidProof, Unauthorized};
use crate::tree::TreeHasher;
use crate::types::{Address, Amount, MerkleRoot};
use crate::utils::hex_encode;
use crate::Result;

/// Record of a successful claim
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimReceipt {
    /// Address credited
    pub claimant: Address,
    /// Amount credited
    pub amount: Amount,
    /// Root commitment the proof was checked against
    pub merkle_root: MerkleRoot,
}

/// Record of a root replacement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootUpdate {
    /// Root before the update
    pub previous: MerkleRoot,
    /// Root after the update
    pub current: MerkleRoot,
}

/// Exactly-once claim verifier
///
/// Leaves and proofs are checked with `H`, which must be the hasher the
/// root was built with.
///
/// # Examples
///
/// ```rust
/// use merkle_airdrop::commitment::{build_tree, Entitlement};
/// use merkle_airdrop::distributor::ClaimVerifier;
/// use merkle_airdrop::tree::ProofProvider;
///
/// let admin = [0xaau8; 20];
/// let alice = Entitlement::new([1u8; 20], 1000);
/// let tree = build_tree(&[alice, Entitlement::new([2u8; 20], 2000)])?;
///
/// let mut verifier = ClaimVerifier::new(admin, tree.root());
/// let proof = tree.get_proof(&alice)?;
/// verifier.claim(alice.address, 1000, &proof)?;
///
/// assert_eq!(verifier.balance_of(&alice.address), 1000);
/// assert!(verifier.claim(alice.address, 1000, &proof).is_err());
/// # Ok::<(), merkle_airdrop::errors::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClaimVerifier<L = InMemoryLedger, H = Keccak256Hasher> {
    admin: Address,
    merkle_root: MerkleRoot,
    records: ClaimRecords,
    ledger: L,
    hasher: H,
    total_claimed: Amount,
}

impl ClaimVerifier<InMemoryLedger> {
    /// Creates a verifier backed by an empty in-memory ledger
    ///
    /// # Arguments
    /// * `admin` - Identity allowed to replace the root
    /// * `initial_root` - Root commitment of the first generation
    pub fn new(admin: Address, initial_root: MerkleRoot) -> Self {
        Self::with_ledger(admin, initial_root, InMemoryLedger::new())
    }
}

impl<L: Ledger> ClaimVerifier<L> {
    /// Creates a verifier that credits claims to `ledger`
    pub fn with_ledger(admin: Address, initial_root: MerkleRoot, ledger: L) -> Self {
        Self::with_hasher(admin, initial_root, ledger, Keccak256Hasher)
    }
}

impl<L: Ledger, H: TreeHasher> ClaimVerifier<L, H> {
    /// Creates a verifier for roots built with a custom hasher
    ///
    /// # Arguments
    /// * `admin` - Identity allowed to replace the root
    /// * `initial_root` - Root commitment of the first generation
    /// * `ledger` - Ledger credited on each claim
    /// * `hasher` - Hasher the root was built with
    pub fn with_hasher(admin: Address, initial_root: MerkleRoot, ledger: L, hasher: H) -> Self {
        Self {
            admin,
            merkle_root: initial_root,
            records: ClaimRecords::new(),
            ledger,
            hasher,
            total_claimed: 0,
        }
    }

    /// Current root commitment
    pub fn merkle_root(&self) -> MerkleRoot { self.merkle_root }

    /// Administrator identity
    pub fn admin(&self) -> Address { self.admin }

    /// Claim status of `address`
    pub fn claim_status(&self, address: &Address) -> ClaimStatus { self.records.status(address) }

    /// Whether `address` has claimed
    pub fn is_claimed(&self, address: &Address) -> bool { self.records.is_claimed(address) }

    /// Ledger balance of `address`
    pub fn balance_of(&self, address: &Address) -> Amount { self.ledger.balance_of(address) }

    /// Number of addresses that have claimed
    pub fn claimed_count(&self) -> usize { self.records.len() }

    /// Sum of all claimed amounts
    pub fn total_claimed(&self) -> Amount { self.total_claimed }

    /// Claim records
    pub fn records(&self) -> &ClaimRecords { &self.records }

    /// Ledger collaborator
    pub fn ledger(&self) -> &L { &self.ledger }

    /// Hasher used for leaves and proofs
    pub fn hasher(&self) -> &H { &self.hasher }

    /// Checks a claim without applying it
    ///
    /// Runs the same checks as [`ClaimVerifier::claim`] in the same order.
    ///
    /// # Errors
    /// * `Err(Error::Distributor(DistributorError::AlreadyClaimed))` - If `caller` has already claimed
    /// * `Err(Error::Distributor(DistributorError::InvalidProof))` - If the proof does not fold to the current root
    pub fn can_claim(&self, caller: Address, amount: Amount, proof: &MerkleProof) -> Result<()> {
        if self.records.is_claimed(&caller) {
            return Err(AlreadyClaimed(caller).into());
        }
        let leaf = Entitlement::new(caller, amount).leaf_with(&self.hasher);
        if !verify_merkle_proof_with(leaf, proof, self.merkle_root, &self.hasher) {
            return Err(InvalidProof.into());
        }
        Ok(())
    }

    /// Claims `amount` for `caller`
    ///
    /// The claim record is committed before the ledger is credited. If the
    /// ledger rejects the mint, the record is reverted and no state changes.
    ///
    /// # Arguments
    /// * `caller` - The claiming address; the leaf is recomputed from it
    /// * `amount` - The entitled amount
    /// * `proof` - Membership proof against the current root
    ///
    /// # Returns
    /// * `Ok(ClaimReceipt)` - The credited claim
    ///
    /// # Errors
    /// * `Err(Error::Distributor(DistributorError::AlreadyClaimed))` - If `caller` has already claimed
    /// * `Err(Error::Distributor(DistributorError::InvalidProof))` - If the proof does not fold to the current root
    /// * `Err(Error::Distributor(DistributorError::ClaimedTotalOverflow))` - If the running total would overflow
    /// * `Err(Error::Ledger(_))` - If the ledger rejects the mint
    pub fn claim(&mut self, caller: Address, amount: Amount, proof: &MerkleProof) -> Result<ClaimReceipt> {
        if let Err(e) = self.can_claim(caller, amount, proof) {
            warn!(claimant = %hex_encode(caller), amount = %amount, error = %e, "claim rejected");
            return Err(e);
        }
        let total_claimed = match self.total_claimed.checked_add(amount) {
            Some(total) => total,
            None => {
                warn!(claimant = %hex_encode(caller), amount = %amount, "claimed total overflow");
                return Err(ClaimedTotalOverflow { total: self.total_claimed, amount }.into());
            }
        };

        self.records.mark_claimed(caller);
        if let Err(e) = self.ledger.mint(caller, amount) {
            self.records.revert_claim(&caller);
            warn!(claimant = %hex_encode(caller), amount = %amount, error = %e, "mint failed, claim reverted");
            return Err(e.into());
        }
        self.total_claimed = total_claimed;

        info!(claimant = %hex_encode(caller), amount = %amount, "claim accepted");
        Ok(ClaimReceipt { claimant: caller, amount, merkle_root: self.merkle_root })
    }

    /// Replaces the root commitment
    ///
    /// Claim records are untouched: addresses that already claimed stay
    /// `Claimed` under the new root.
    ///
    /// # Errors
    /// * `Err(Error::Distributor(DistributorError::Unauthorized))` - If `caller` is not the administrator
    pub fn set_merkle_root(&mut self, caller: Address, new_root: MerkleRoot) -> Result<RootUpdate> {
        if caller != self.admin {
            warn!(caller = %hex_encode(caller), "unauthorized root update");
            return Err(Unauthorized { caller }.into());
        }

        let previous = std::mem::replace(&mut self.merkle_root, new_root);
        info!(previous = %hex_encode(previous), current = %hex_encode(new_root), "merkle root updated");
        debug!(claimed = self.records.len(), "claim records carried over");
        Ok(RootUpdate { previous, current: new_root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::{build_tree, build_tree_with, SortedPairConfig};
    use crate::errors::{DistributorError, Error, LedgerError};
    use crate::tree::ProofProvider;
    use crate::types::{Bytes32, Leaf};
    use crate::utils::{hash_sorted_pair, keccak256, leaf_preimage};

    const ADMIN: Address = [0xaau8; 20];

    fn entitlements() -> Vec<Entitlement> {
        vec![
            Entitlement::new([1u8; 20], 1000),
            Entitlement::new([2u8; 20], 2000),
            Entitlement::new([3u8; 20], 1000),
        ]
    }

    /// Ledger that refuses every mint
    #[derive(Default)]
    struct FrozenLedger;

    impl Ledger for FrozenLedger {
        fn mint(&mut self, _to: Address, amount: Amount) -> std::result::Result<(), LedgerError> {
            Err(LedgerError::SupplyOverflow { supply: 0, amount })
        }

        fn balance_of(&self, _owner: &Address) -> Amount { 0 }

        fn total_supply(&self) -> Amount { 0 }
    }

    /// Ledger that accepts every mint without tracking balances
    #[derive(Default)]
    struct UnboundedLedger;

    impl Ledger for UnboundedLedger {
        fn mint(&mut self, _to: Address, _amount: Amount) -> std::result::Result<(), LedgerError> {
            Ok(())
        }

        fn balance_of(&self, _owner: &Address) -> Amount { 0 }

        fn total_supply(&self) -> Amount { 0 }
    }

    /// Keccak-256 hasher with a one-byte domain tag on leaves
    #[derive(Clone, Copy, Debug, Default)]
    struct TaggedLeafHasher;

    impl TreeHasher for TaggedLeafHasher {
        fn hash_leaf(&self, address: &Address, amount: Amount) -> Leaf {
            let mut tagged = vec![0x00];
            tagged.extend_from_slice(&leaf_preimage(address, amount));
            keccak256(&tagged)
        }

        fn hash_pair(&self, a: Bytes32, b: Bytes32) -> Bytes32 { hash_sorted_pair(a, b) }
    }

    #[test]
    fn test_new() {
        let verifier = ClaimVerifier::new(ADMIN, [7u8; 32]);

        assert_eq!(verifier.merkle_root(), [7u8; 32]);
        assert_eq!(verifier.admin(), ADMIN);
        assert_eq!(verifier.claimed_count(), 0);
        assert_eq!(verifier.total_claimed(), 0);
        assert_eq!(verifier.claim_status(&[1u8; 20]), ClaimStatus::Unclaimed);
    }

    #[test]
    fn test_claim() {
        let input = entitlements();
        let tree = build_tree(&input).expect("tree should build");
        let mut verifier = ClaimVerifier::new(ADMIN, tree.root());
        let proof = tree.get_proof(&input[1]).expect("proof should exist");

        let receipt = verifier.claim(input[1].address, 2000, &proof).expect("claim should succeed");

        assert_eq!(receipt, ClaimReceipt { claimant: input[1].address, amount: 2000, merkle_root: tree.root() });
        assert_eq!(verifier.balance_of(&input[1].address), 2000);
        assert_eq!(verifier.balance_of(&input[0].address), 0);
        assert_eq!(verifier.claim_status(&input[1].address), ClaimStatus::Claimed);
        assert_eq!(verifier.total_claimed(), 2000);
        assert_eq!(verifier.ledger().total_supply(), 2000);
    }

    #[test]
    fn test_claim_twice() {
        let input = entitlements();
        let tree = build_tree(&input).expect("tree should build");
        let mut verifier = ClaimVerifier::new(ADMIN, tree.root());
        let proof = tree.get_proof(&input[0]).expect("proof should exist");
        verifier.claim(input[0].address, 1000, &proof).expect("claim should succeed");

        let same = verifier.claim(input[0].address, 1000, &proof);
        let garbage = verifier.claim(input[0].address, 1, &MerkleProof::default());

        let expected = Err(Error::Distributor(DistributorError::AlreadyClaimed(input[0].address)));
        assert_eq!(same, expected);
        assert_eq!(garbage, expected);
        assert_eq!(verifier.balance_of(&input[0].address), 1000);
    }

    #[test]
    fn test_claim_invalid_proof() {
        let input = entitlements();
        let tree = build_tree(&input).expect("tree should build");
        let mut verifier = ClaimVerifier::new(ADMIN, tree.root());
        let proof = tree.get_proof(&input[0]).expect("proof should exist");

        let wrong_amount = verifier.claim(input[0].address, 2000, &proof);
        let wrong_caller = verifier.claim(input[1].address, 1000, &proof);

        assert_eq!(wrong_amount, Err(Error::Distributor(DistributorError::InvalidProof)));
        assert_eq!(wrong_caller, Err(Error::Distributor(DistributorError::InvalidProof)));
        assert_eq!(verifier.claimed_count(), 0);
        assert_eq!(verifier.ledger().total_supply(), 0);
    }

    #[test]
    fn test_claim_reverted_when_mint_fails() {
        let input = entitlements();
        let tree = build_tree(&input).expect("tree should build");
        let mut verifier = ClaimVerifier::with_ledger(ADMIN, tree.root(), FrozenLedger);
        let proof = tree.get_proof(&input[0]).expect("proof should exist");

        let result = verifier.claim(input[0].address, 1000, &proof);

        assert!(matches!(result, Err(Error::Ledger(LedgerError::SupplyOverflow { .. }))));
        assert_eq!(verifier.claim_status(&input[0].address), ClaimStatus::Unclaimed);
        assert_eq!(verifier.total_claimed(), 0);
    }

    #[test]
    fn test_can_claim() {
        let input = entitlements();
        let tree = build_tree(&input).expect("tree should build");
        let mut verifier = ClaimVerifier::new(ADMIN, tree.root());
        let proof = tree.get_proof(&input[2]).expect("proof should exist");

        assert!(verifier.can_claim(input[2].address, 1000, &proof).is_ok());
        assert!(verifier.can_claim(input[2].address, 999, &proof).is_err());
        assert_eq!(verifier.claimed_count(), 0);

        verifier.claim(input[2].address, 1000, &proof).expect("claim should succeed");

        assert_eq!(
            verifier.can_claim(input[2].address, 1000, &proof),
            Err(Error::Distributor(DistributorError::AlreadyClaimed(input[2].address)))
        );
    }

    #[test]
    fn test_set_merkle_root() {
        let mut verifier = ClaimVerifier::new(ADMIN, [1u8; 32]);

        let update = verifier.set_merkle_root(ADMIN, [2u8; 32]).expect("admin may update");

        assert_eq!(update, RootUpdate { previous: [1u8; 32], current: [2u8; 32] });
        assert_eq!(verifier.merkle_root(), [2u8; 32]);
    }

    #[test]
    fn test_set_merkle_root_unauthorized() {
        let mut verifier = ClaimVerifier::new(ADMIN, [1u8; 32]);
        let intruder = [0xbbu8; 20];

        let result = verifier.set_merkle_root(intruder, [2u8; 32]);

        assert_eq!(result, Err(Error::Distributor(DistributorError::Unauthorized { caller: intruder })));
        assert_eq!(verifier.merkle_root(), [1u8; 32]);
    }

    #[test]
    fn test_set_merkle_root_keeps_claims() {
        let input = entitlements();
        let tree = build_tree(&input).expect("tree should build");
        let mut verifier = ClaimVerifier::new(ADMIN, tree.root());
        let proof = tree.get_proof(&input[0]).expect("proof should exist");
        verifier.claim(input[0].address, 1000, &proof).expect("claim should succeed");
        let regenerated = vec![Entitlement::new(input[0].address, 4000), input[1]];
        let new_tree = build_tree(&regenerated).expect("tree should build");

        verifier.set_merkle_root(ADMIN, new_tree.root()).expect("admin may update");
        let new_proof = new_tree.get_proof(&regenerated[0]).expect("proof should exist");
        let result = verifier.claim(input[0].address, 4000, &new_proof);

        assert_eq!(result, Err(Error::Distributor(DistributorError::AlreadyClaimed(input[0].address))));
        assert_eq!(verifier.balance_of(&input[0].address), 1000);
    }

    #[test]
    fn test_set_merkle_root_accepts_any_value() {
        let mut verifier = ClaimVerifier::new(ADMIN, [1u8; 32]);

        verifier.set_merkle_root(ADMIN, [0u8; 32]).expect("admin may update");
        verifier.set_merkle_root(ADMIN, [0u8; 32]).expect("admin may update");

        assert_eq!(verifier.merkle_root(), [0u8; 32]);
    }

    #[test]
    fn test_claim_with_custom_hasher() {
        let input = entitlements();
        let tree =
            build_tree_with(&input, &TaggedLeafHasher, &SortedPairConfig).expect("tree should build");
        let proof = tree.get_proof(&input[1]).expect("proof should exist");
        let mut tagged =
            ClaimVerifier::with_hasher(ADMIN, tree.root(), InMemoryLedger::new(), TaggedLeafHasher);
        let mut keccak = ClaimVerifier::new(ADMIN, tree.root());

        let default_result = keccak.claim(input[1].address, 2000, &proof);
        let receipt = tagged.claim(input[1].address, 2000, &proof).expect("claim should succeed");

        assert_eq!(default_result, Err(Error::Distributor(DistributorError::InvalidProof)));
        assert_eq!(receipt.amount, 2000);
        assert_eq!(tagged.balance_of(&input[1].address), 2000);
    }

    #[test]
    fn test_claim_total_overflow() {
        let whale = Entitlement::new([1u8; 20], u128::MAX);
        let minnow = Entitlement::new([2u8; 20], 1);
        let first = build_tree(&[whale]).expect("tree should build");
        let second = build_tree(&[minnow]).expect("tree should build");
        let mut verifier = ClaimVerifier::with_ledger(ADMIN, first.root(), UnboundedLedger);
        verifier
            .claim(whale.address, whale.amount, &MerkleProof::default())
            .expect("claim should succeed");
        verifier.set_merkle_root(ADMIN, second.root()).expect("admin may update");

        let result = verifier.claim(minnow.address, minnow.amount, &MerkleProof::default());

        assert_eq!(
            result,
            Err(Error::Distributor(DistributorError::ClaimedTotalOverflow { total: u128::MAX, amount: 1 }))
        );
        assert_eq!(verifier.claim_status(&minnow.address), ClaimStatus::Unclaimed);
        assert_eq!(verifier.total_claimed(), u128::MAX);
    }
}
