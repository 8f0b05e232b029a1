//! Merkle tree building functions

use std::collections::BTreeMap;

use tracing::debug;

use super::config::DEFAULT_CONFIG;
use super::entitlement::Entitlement;
use super::hasher::DEFAULT_HASHER;
use super::types::MerkleProof;
use crate::errors::CommitmentError::{
    DuplicateAddress, EmptyEntitlements, EntitlementNotFound, LeafNotFound, TotalOverflow,
};
use crate::tree::{OddNodePolicy, ProofProvider, TreeConfig, TreeHasher};
use crate::types::{Address, Amount, Bytes32, Leaf, MerkleRoot};
use crate::Result;

/// A built tree over one generation of entitlements
///
/// Holds every level of the tree (leaves first, root last) so that proofs can
/// be replayed for any entitlement without rehashing.
///
/// # Invariants
///
/// - `levels` is never empty and its last level holds exactly one node
/// - every address appears at most once
/// - each level is `ceil(previous / 2)` nodes long
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionTree {
    levels: Vec<Vec<Bytes32>>,
    entitlements: Vec<Entitlement>,
    by_address: BTreeMap<Address, (Amount, Leaf)>,
    leaf_index: BTreeMap<Leaf, usize>,
    odd_node_policy: OddNodePolicy,
    token_total: Amount,
}

/// Builds a tree with the default Keccak-256 hasher and sorted-pair config
///
/// # Errors
/// * `Err(Error::Commitment(CommitmentError::EmptyEntitlements))` - If `entitlements` is empty
/// * `Err(Error::Commitment(CommitmentError::DuplicateAddress))` - If an address appears twice
/// * `Err(Error::Commitment(CommitmentError::TotalOverflow))` - If the amounts do not fit in an `Amount`
///
/// # Example
///
/// ```rust
/// use merkle_airdrop::commitment::{build_tree, Entitlement};
///
/// let entitlements = [
///     Entitlement::new([1u8; 20], 1000),
///     Entitlement::new([2u8; 20], 2000),
///     Entitlement::new([3u8; 20], 1000),
/// ];
/// let tree = build_tree(&entitlements)?;
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.depth(), 2);
/// # Ok::<(), merkle_airdrop::errors::Error>(())
/// ```
pub fn build_tree(entitlements: &[Entitlement]) -> Result<DistributionTree> {
    build_tree_with(entitlements, &DEFAULT_HASHER, &DEFAULT_CONFIG)
}

/// Builds a tree with a custom hasher and config
pub fn build_tree_with<H: TreeHasher, C: TreeConfig>(
    entitlements: &[Entitlement],
    hasher: &H,
    config: &C,
) -> Result<DistributionTree> {
    if entitlements.is_empty() {
        return Err(EmptyEntitlements.into());
    }

    let mut by_address = BTreeMap::new();
    let mut token_total: Amount = 0;
    let mut leaves = Vec::with_capacity(entitlements.len());
    for entitlement in entitlements {
        let leaf = entitlement.leaf_with(hasher);
        if by_address.insert(entitlement.address, (entitlement.amount, leaf)).is_some() {
            return Err(DuplicateAddress(entitlement.address).into());
        }
        token_total = token_total.checked_add(entitlement.amount).ok_or(TotalOverflow)?;
        leaves.push(leaf);
    }

    if config.sort_leaves() {
        leaves.sort_unstable();
    }
    let leaf_index = leaves.iter().enumerate().map(|(i, leaf)| (*leaf, i)).collect();

    let odd_node_policy = config.odd_node_policy();
    let mut levels = vec![leaves];
    while let Some(level) = levels.last().filter(|level| level.len() > 1) {
        let next = hash_level(level, hasher, odd_node_policy);
        levels.push(next);
    }

    debug!(leaves = entitlements.len(), depth = levels.len() - 1, "built distribution tree");

    Ok(DistributionTree {
        levels,
        entitlements: entitlements.to_vec(),
        by_address,
        leaf_index,
        odd_node_policy,
        token_total,
    })
}

/// Pairs adjacent nodes of one level into the next level
fn hash_level<H: TreeHasher>(level: &[Bytes32], hasher: &H, policy: OddNodePolicy) -> Vec<Bytes32> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    for chunk in level.chunks(2) {
        let parent = match (chunk[0], chunk.get(1)) {
            (left, Some(right)) => hasher.hash_pair(left, *right),
            (odd, None) => match policy {
                OddNodePolicy::Promote => odd,
                OddNodePolicy::Duplicate => hasher.hash_pair(odd, odd),
            },
        };
        next.push(parent);
    }
    next
}

impl DistributionTree {
    /// Root commitment
    pub fn root(&self) -> MerkleRoot {
        // levels is non-empty and ends in a single node by construction
        self.levels.last().and_then(|level| level.first()).copied().unwrap_or_default()
    }

    /// Number of entitlements (leaves)
    pub fn len(&self) -> usize { self.entitlements.len() }

    /// Always `false`; empty trees cannot be built
    pub fn is_empty(&self) -> bool { self.entitlements.is_empty() }

    /// Number of hashing levels above the leaves
    pub fn depth(&self) -> usize { self.levels.len() - 1 }

    /// All levels, leaves first and root last
    pub fn levels(&self) -> &[Vec<Bytes32>] { &self.levels }

    /// Entitlements in input order
    pub fn entitlements(&self) -> &[Entitlement] { &self.entitlements }

    /// Sum of all entitled amounts
    pub fn token_total(&self) -> Amount { self.token_total }

    /// Policy used for trailing unpaired nodes
    pub fn odd_node_policy(&self) -> OddNodePolicy { self.odd_node_policy }

    /// Amount entitled to `address`, if it is in this generation
    pub fn amount_of(&self, address: &Address) -> Option<Amount> {
        self.by_address.get(address).map(|(amount, _)| *amount)
    }

    /// Whether the exact `(address, amount)` pair is in this generation
    pub fn contains(&self, entitlement: &Entitlement) -> bool {
        self.amount_of(&entitlement.address) == Some(entitlement.amount)
    }

    /// Returns the proof for a leaf
    ///
    /// Walks the stored levels from the leaf upwards, recording the sibling of
    /// the path node at each level. A promoted node records nothing; under
    /// [`OddNodePolicy::Duplicate`] it records itself.
    ///
    /// # Errors
    /// * `Err(Error::Commitment(CommitmentError::LeafNotFound))` - If `leaf` is not in the tree
    pub fn get_proof_for_leaf(&self, leaf: Leaf) -> Result<MerkleProof> {
        let mut index = *self.leaf_index.get(&leaf).ok_or(LeafNotFound(leaf))?;
        let mut path = Vec::with_capacity(self.depth());

        for level in &self.levels[..self.depth()] {
            let sibling = index ^ 1;
            if let Some(node) = level.get(sibling) {
                path.push(*node);
            } else if self.odd_node_policy == OddNodePolicy::Duplicate {
                path.push(level[index]);
            }
            index /= 2;
        }

        Ok(MerkleProof { path })
    }
}

impl ProofProvider for DistributionTree {
    fn root(&self) -> Bytes32 { DistributionTree::root(self) }

    fn get_proof(&self, entitlement: &Entitlement) -> Result<MerkleProof> {
        let leaf = match self.by_address.get(&entitlement.address) {
            Some((amount, leaf)) if *amount == entitlement.amount => *leaf,
            _ => {
                return Err(EntitlementNotFound {
                    address: entitlement.address,
                    amount: entitlement.amount,
                }
                .into())
            }
        };
        self.get_proof_for_leaf(leaf)
    }
}
