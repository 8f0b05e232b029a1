//! Token ledger collaborator
//!
//! The verifier only needs to credit claimants and read balances; transfer
//! and approval semantics live outside this crate.

use std::collections::BTreeMap;

use crate::errors::LedgerError;
use crate::types::{Address, Amount};

/// Minimal fungible-token ledger used by the claim verifier
pub trait Ledger {
    /// Credits `amount` to `to`
    ///
    /// # Errors
    /// Implementations may reject a mint that would overflow; the verifier
    /// then reverts the claim.
    fn mint(&mut self, to: Address, amount: Amount) -> Result<(), LedgerError>;

    /// Returns the balance of `owner` (zero for unknown accounts)
    fn balance_of(&self, owner: &Address) -> Amount;

    /// Returns the total amount minted
    fn total_supply(&self) -> Amount;
}

/// In-memory ledger with checked arithmetic
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: BTreeMap<Address, Amount>,
    total_supply: Amount,
}

impl InMemoryLedger {
    /// Creates an empty ledger
    pub fn new() -> Self { Self::default() }

    /// Accounts with a non-zero balance, ascending by address
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Amount)> { self.balances.iter() }
}

impl Ledger for InMemoryLedger {
    fn mint(&mut self, to: Address, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance_of(&to);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { owner: to, balance, amount })?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow { supply: self.total_supply, amount })?;

        if new_balance > 0 {
            self.balances.insert(to, new_balance);
        }
        self.total_supply = new_supply;
        Ok(())
    }

    fn balance_of(&self, owner: &Address) -> Amount { self.balances.get(owner).copied().unwrap_or(0) }

    fn total_supply(&self) -> Amount { self.total_supply }
}
