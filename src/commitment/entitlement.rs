//! Entitlement records

use std::fmt;
use std::str::FromStr;

use super::hasher::DEFAULT_HASHER;
use crate::errors::DistributionError;
use crate::tree::TreeHasher;
use crate::types::{Address, Amount, Leaf};
use crate::utils::{hex_encode, parse_address, parse_amount};

/// One recipient's pre-assigned amount within a generation
///
/// # Examples
///
/// ```rust
/// use merkle_airdrop::commitment::Entitlement;
///
/// let entitlement: Entitlement = "0x1111111111111111111111111111111111111111,1000".parse()?;
/// assert_eq!(entitlement.amount, 1000);
/// # Ok::<(), merkle_airdrop::errors::DistributionError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entitlement {
    /// Recipient address
    pub address: Address,
    /// Amount the recipient may claim
    pub amount: Amount,
}

impl Entitlement {
    /// Creates a new entitlement
    pub fn new(address: Address, amount: Amount) -> Self { Self { address, amount } }

    /// Computes the leaf using the default Keccak-256 hasher
    pub fn leaf(&self) -> Leaf { self.leaf_with(&DEFAULT_HASHER) }

    /// Computes the leaf using a custom hasher
    pub fn leaf_with<H: TreeHasher>(&self, hasher: &H) -> Leaf {
        hasher.hash_leaf(&self.address, self.amount)
    }
}

impl fmt::Display for Entitlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", hex_encode(self.address), self.amount)
    }
}

impl FromStr for Entitlement {
    type Err = DistributionError;

    /// Parses `address,amount`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, amount) = s.split_once(',').ok_or_else(|| {
            DistributionError::MalformedEntry(format!("expected 'address,amount', got '{}'", s.trim()))
        })?;
        Ok(Self { address: parse_address(address)?, amount: parse_amount(amount)? })
    }
}
