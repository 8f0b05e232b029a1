//! Configuration implementations for tree construction

use crate::tree::{OddNodePolicy, TreeConfig};

/// Sorted-leaf, sorted-pair configuration with odd-node promotion
///
/// This is the shape produced by `merkletreejs` with `{ sort: true }` and
/// verified by OpenZeppelin's `MerkleProof.verify`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SortedPairConfig;

impl TreeConfig for SortedPairConfig {
    fn sort_leaves(&self) -> bool { true }

    fn odd_node_policy(&self) -> OddNodePolicy { OddNodePolicy::Promote }
}

/// Sorted-leaf configuration that pairs a trailing odd node with itself
#[derive(Clone, Copy, Debug, Default)]
pub struct DuplicateOddConfig;

impl TreeConfig for DuplicateOddConfig {
    fn sort_leaves(&self) -> bool { true }

    fn odd_node_policy(&self) -> OddNodePolicy { OddNodePolicy::Duplicate }
}

/// Default config instance
pub(crate) const DEFAULT_CONFIG: SortedPairConfig = SortedPairConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_pair_config() {
        let config = SortedPairConfig;
        assert!(config.sort_leaves());
        assert_eq!(config.odd_node_policy(), OddNodePolicy::Promote);
    }

    #[test]
    fn test_duplicate_odd_config() {
        let config = DuplicateOddConfig;
        assert!(config.sort_leaves());
        assert_eq!(config.odd_node_policy(), OddNodePolicy::Duplicate);
    }
}
