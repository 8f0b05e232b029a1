//! Claim record lifecycle
//!
//! Each address has a claim record that starts `Unclaimed` and moves to
//! `Claimed` on its first successful claim.
//!
//! # Invariants
//!
//! - `Claimed` is terminal; no operation moves a record back
//! - records are keyed by address only, never by root commitment

use std::collections::BTreeSet;

use crate::types::Address;

/// Per-address claim lifecycle
///
/// State transitions:
/// - Unclaimed → Claimed (via a successful claim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimStatus {
    /// The address has not claimed yet
    #[default]
    Unclaimed,
    /// The address has claimed; further claims are rejected
    Claimed,
}

/// Set of addresses that have claimed
///
/// Absence means `Unclaimed`, so no entry is created until a claim succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimRecords {
    claimed: BTreeSet<Address>,
}

impl ClaimRecords {
    /// Creates an empty record set
    pub fn new() -> Self { Self::default() }

    /// Returns the status of `address`
    pub fn status(&self, address: &Address) -> ClaimStatus {
        if self.claimed.contains(address) {
            ClaimStatus::Claimed
        } else {
            ClaimStatus::Unclaimed
        }
    }

    /// Whether `address` has claimed
    pub fn is_claimed(&self, address: &Address) -> bool { self.claimed.contains(address) }

    /// Moves `address` to `Claimed`
    ///
    /// # Returns
    /// `true` if the address was `Unclaimed`, `false` if it had already claimed
    pub(crate) fn mark_claimed(&mut self, address: Address) -> bool { self.claimed.insert(address) }

    /// Reverts a claim that could not be completed
    pub(crate) fn revert_claim(&mut self, address: &Address) { self.claimed.remove(address); }

    /// Number of addresses that have claimed
    pub fn len(&self) -> usize { self.claimed.len() }

    /// Whether no address has claimed
    pub fn is_empty(&self) -> bool { self.claimed.is_empty() }

    /// Iterates claimed addresses in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &Address> { self.claimed.iter() }
}
