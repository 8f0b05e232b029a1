//! Keccak-256 hashing and hex encoding helpers
use sha3::{Digest, Keccak256};

use crate::errors::DistributionError;
use crate::types::{Address, Amount, Bytes32, ADDRESS_LEN, AMOUNT_WORD_LEN, LEAF_PREIMAGE_LEN};

/// Computes the Keccak-256 digest of `data`
pub fn keccak256(data: &[u8]) -> Bytes32 { Keccak256::digest(data).into() }

/// Hashes two 32-byte nodes in sorted order
///
/// The smaller value (by byte comparison) is placed first, so the result does
/// not depend on which side of the pair each node sits on.
pub fn hash_sorted_pair(a: Bytes32, b: Bytes32) -> Bytes32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Keccak256::new().chain_update(lo).chain_update(hi).finalize().into()
}

/// Packs an amount into a 32-byte big-endian word
pub fn amount_to_word(amount: Amount) -> [u8; AMOUNT_WORD_LEN] {
    let mut word = [0u8; AMOUNT_WORD_LEN];
    word[AMOUNT_WORD_LEN - 16..].copy_from_slice(&amount.to_be_bytes());
    word
}

/// Builds the packed leaf preimage `address ++ uint256(amount)`
pub fn leaf_preimage(address: &Address, amount: Amount) -> [u8; LEAF_PREIMAGE_LEN] {
    let mut preimage = [0u8; LEAF_PREIMAGE_LEN];
    preimage[..ADDRESS_LEN].copy_from_slice(address);
    preimage[ADDRESS_LEN..].copy_from_slice(&amount_to_word(amount));
    preimage
}

/// Formats bytes as a `0x`-prefixed lowercase hex string
pub fn hex_encode<T: AsRef<[u8]>>(bytes: T) -> String { format!("0x{}", hex::encode(bytes)) }

fn decode_fixed<const N: usize>(value: &str) -> Result<[u8; N], DistributionError> {
    let trimmed = value.trim();
    let cleaned = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if cleaned.len() != N * 2 {
        return Err(DistributionError::InvalidHex(format!(
            "expected {} hex chars, got {} in '{}'",
            N * 2,
            cleaned.len(),
            trimmed
        )));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(cleaned, &mut out)
        .map_err(|e| DistributionError::InvalidHex(format!("'{}': {}", trimmed, e)))?;
    Ok(out)
}

/// Parses a 20-byte address from hex, with or without `0x` prefix
pub fn parse_address(value: &str) -> Result<Address, DistributionError> { decode_fixed(value) }

/// Parses a 32-byte hash from hex, with or without `0x` prefix
pub fn parse_bytes32(value: &str) -> Result<Bytes32, DistributionError> { decode_fixed(value) }

/// Parses a decimal amount
pub fn parse_amount(value: &str) -> Result<Amount, DistributionError> {
    let trimmed = value.trim();
    trimmed.parse::<Amount>().map_err(|e| DistributionError::InvalidAmount(format!("'{}': {}", trimmed, e)))
}
