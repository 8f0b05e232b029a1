use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use merkle_airdrop::distribution::DistributionFile;
use merkle_airdrop::utils::{hex_encode, parse_address};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct Cli {
    /// Distribution file written by `build-tree`
    #[arg(short, long, default_value = "merkleTree.json")]
    tree: PathBuf,

    /// Claimant address
    #[arg(short, long)]
    address: String,
}

/// Claim payload for one address
#[derive(Debug, Serialize)]
pub struct ProofOutput {
    pub address: String,
    pub amount: String,
    pub proof: Vec<String>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let address = parse_address(&cli.address).context("Invalid address")?;
    let file = DistributionFile::load(&cli.tree)
        .with_context(|| format!("Failed to read distribution file {:?}", cli.tree))?;

    let (entitlement, proof) = file
        .claim_for(&address)
        .context("Malformed distribution entry")?
        .with_context(|| format!("Address {} is not in the distribution", hex_encode(address)))?;

    let output = ProofOutput {
        address: hex_encode(entitlement.address),
        amount: entitlement.amount.to_string(),
        proof: proof.to_hex(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
