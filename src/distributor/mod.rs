//! Claim verifier for Merkle-committed distributions
//!
//! This module provides the stateful side of the distribution: a
//! deterministic state machine holding the current root commitment, the
//! administrator identity and a per-address claim record. Each address moves
//! `Unclaimed -> Claimed` at most once, independent of root updates.
//!
//! # Structure
//!
//! - `state`: claim records and lifecycle
//! - `ledger`: token ledger collaborator credited on each claim
//! - `operation`: operations applied to the verifier
//! - `verifier`: the single-owner state machine
//! - `shared`: lock-guarded handle for concurrent hosts

pub mod ledger;
pub mod operation;
pub mod shared;
pub mod state;
pub mod verifier;

pub use ledger::{InMemoryLedger, Ledger};
pub use operation::{DistributorOperation, OperationOutcome};
pub use shared::SharedClaimVerifier;
pub use state::{ClaimRecords, ClaimStatus};
pub use verifier::{ClaimReceipt, ClaimVerifier, RootUpdate};
