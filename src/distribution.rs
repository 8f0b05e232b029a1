//! Distribution files
//!
//! A distribution file is the persisted output of one builder run: the root
//! commitment the verifier is deployed with, plus every recipient's amount
//! and proof so users can fetch their claim without rebuilding the tree.
//!
//! ```json
//! {
//!   "merkleRoot": "0x…",
//!   "tokenTotal": "16000",
//!   "claims": {
//!     "0x1111…": { "amount": "1000", "proof": ["0x…", "0x…"] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::commitment::{verify_entitlement, DistributionTree, Entitlement, MerkleProof};
use crate::errors::DistributionError;
use crate::tree::ProofProvider;
use crate::types::{Address, MerkleRoot};
use crate::utils::{hex_encode, parse_address, parse_amount, parse_bytes32};
use crate::Result;

/// One recipient's entry in a distribution file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEntry {
    /// Decimal amount
    pub amount: String,
    /// Hex-encoded sibling hashes, leaf level first
    pub proof: Vec<String>,
}

/// Serialized builder output
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionFile {
    /// Hex-encoded root commitment
    pub merkle_root: String,
    /// Decimal sum of all amounts
    pub token_total: String,
    /// Entries keyed by hex-encoded address
    pub claims: BTreeMap<String, ClaimEntry>,
}

impl DistributionFile {
    /// Captures a built tree, including a proof for every entitlement
    pub fn from_tree(tree: &DistributionTree) -> Result<Self> {
        let mut claims = BTreeMap::new();
        for entitlement in tree.entitlements() {
            let proof = tree.get_proof(entitlement)?;
            claims.insert(
                hex_encode(entitlement.address),
                ClaimEntry { amount: entitlement.amount.to_string(), proof: proof.to_hex() },
            );
        }
        Ok(Self {
            merkle_root: hex_encode(tree.root()),
            token_total: tree.token_total().to_string(),
            claims,
        })
    }

    /// Decoded root commitment
    pub fn root(&self) -> Result<MerkleRoot> { Ok(parse_bytes32(&self.merkle_root)?) }

    /// Decoded entitlement and proof for `address`, if present
    pub fn claim_for(&self, address: &Address) -> Result<Option<(Entitlement, MerkleProof)>> {
        match self.claims.get(&hex_encode(address)) {
            Some(entry) => Ok(Some(decode_entry(*address, entry)?)),
            None => Ok(None),
        }
    }

    /// Decoded entitlements and proofs, ascending by address
    pub fn claims(&self) -> Result<Vec<(Entitlement, MerkleProof)>> {
        let mut decoded = Vec::with_capacity(self.claims.len());
        for (address, entry) in &self.claims {
            decoded.push(decode_entry(parse_address(address)?, entry)?);
        }
        Ok(decoded)
    }

    /// Checks that every stored proof folds to the stored root
    ///
    /// # Errors
    /// * `Err(Error::Distribution(DistributionError::RootMismatch))` - On the first failing entry
    pub fn validate(&self) -> Result<()> {
        let root = self.root()?;
        for (entitlement, proof) in self.claims()? {
            if !verify_entitlement(&entitlement, &proof, root) {
                let address = entitlement.address;
                return Err(DistributionError::RootMismatch { address, root }.into());
            }
        }
        Ok(())
    }

    /// Reads a distribution file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(DistributionError::from)?;
        Ok(serde_json::from_str(&content).map_err(DistributionError::from)?)
    }

    /// Writes the file atomically (temp file, then rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(DistributionError::from)?;
        Ok(write_file_atomic(path, &json)?)
    }
}

fn decode_entry(
    address: Address,
    entry: &ClaimEntry,
) -> std::result::Result<(Entitlement, MerkleProof), DistributionError> {
    let amount = parse_amount(&entry.amount)?;
    let path = entry
        .proof
        .iter()
        .map(|node| parse_bytes32(node))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((Entitlement::new(address, amount), MerkleProof::new(path)))
}

/// Writes `contents` to `path` via a sibling temp file and rename
pub fn write_file_atomic(path: &Path, contents: &str) -> std::result::Result<(), DistributionError> {
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Parses an entitlement list, one `address,amount` per line
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Example
///
/// ```rust
/// use merkle_airdrop::distribution::parse_entitlements;
///
/// let text = "# recipients\n0x1111111111111111111111111111111111111111,1000\n\n";
/// let entitlements = parse_entitlements(text)?;
/// assert_eq!(entitlements.len(), 1);
/// # Ok::<(), merkle_airdrop::errors::DistributionError>(())
/// ```
pub fn parse_entitlements(text: &str) -> std::result::Result<Vec<Entitlement>, DistributionError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(line_num, line)| {
            line.parse::<Entitlement>().map_err(|e| match e {
                DistributionError::InvalidHex(msg) => {
                    DistributionError::InvalidHex(format!("line {}: {}", line_num + 1, msg))
                }
                DistributionError::InvalidAmount(msg) => {
                    DistributionError::InvalidAmount(format!("line {}: {}", line_num + 1, msg))
                }
                DistributionError::MalformedEntry(msg) => {
                    DistributionError::MalformedEntry(format!("line {}: {}", line_num + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}
