use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use merkle_airdrop::commitment::{verify_entitlement, Entitlement, MerkleProof};
use merkle_airdrop::utils::{hex_encode, parse_address, parse_amount, parse_bytes32};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct Cli {
    /// Root commitment
    #[arg(short, long)]
    root: String,

    /// Claimant address
    #[arg(short, long)]
    address: String,

    /// Claimed amount
    #[arg(short = 'm', long)]
    amount: String,

    /// Proof file: a JSON array of hashes, or the output of `prove`
    #[arg(short, long)]
    proof: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProofInput {
    Path(Vec<String>),
    Claim { proof: Vec<String> },
}

impl ProofInput {
    fn into_path(self) -> Vec<String> {
        match self {
            Self::Path(path) | Self::Claim { proof: path } => path,
        }
    }
}

fn load_proof(path: &Path) -> Result<MerkleProof> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read proof file {:?}", path))?;
    let input: ProofInput = serde_json::from_str(&content).context("Failed to parse proof JSON")?;
    let nodes = input
        .into_path()
        .iter()
        .map(|node| parse_bytes32(node))
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Invalid proof node")?;
    Ok(MerkleProof::new(nodes))
}

pub fn run(cli: &Cli) -> Result<()> {
    let root = parse_bytes32(&cli.root).context("Invalid root")?;
    let address = parse_address(&cli.address).context("Invalid address")?;
    let amount = parse_amount(&cli.amount).context("Invalid amount")?;
    let proof = load_proof(&cli.proof)?;
    let entitlement = Entitlement::new(address, amount);

    if !verify_entitlement(&entitlement, &proof, root) {
        warn!(address = %hex_encode(address), amount = %amount, root = %hex_encode(root), "proof rejected");
        bail!("Could not verify merkle proof");
    }

    info!(address = %hex_encode(address), amount = %amount, siblings = proof.len(), "proof verified");
    println!("valid");
    Ok(())
}
