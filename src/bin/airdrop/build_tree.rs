use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use merkle_airdrop::commitment::{
    build_tree_with, DuplicateOddConfig, Keccak256Hasher, SortedPairConfig,
};
use merkle_airdrop::distribution::{parse_entitlements, DistributionFile};
use tracing::info;

#[derive(Args, Debug)]
pub struct Cli {
    /// Entitlement list, one `address,amount` per line
    #[arg(short, long)]
    input: PathBuf,

    /// Output distribution file
    #[arg(short, long, default_value = "merkleTree.json")]
    output: PathBuf,

    /// Pair a trailing odd node with itself instead of promoting it
    #[arg(long)]
    duplicate_odd: bool,
}

pub fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read entitlement list {:?}", cli.input))?;
    let entitlements = parse_entitlements(&text).context("Failed to parse entitlement list")?;
    info!(entitlements = entitlements.len(), input = ?cli.input, "loaded entitlement list");

    let tree = if cli.duplicate_odd {
        build_tree_with(&entitlements, &Keccak256Hasher, &DuplicateOddConfig)
    } else {
        build_tree_with(&entitlements, &Keccak256Hasher, &SortedPairConfig)
    }
    .context("Failed to build distribution tree")?;

    let file = DistributionFile::from_tree(&tree).context("Failed to collect proofs")?;
    file.save(&cli.output)
        .with_context(|| format!("Failed to write distribution file {:?}", cli.output))?;

    info!(
        root = %file.merkle_root,
        total = %file.token_total,
        output = ?cli.output,
        "wrote distribution file"
    );
    println!("{}", file.merkle_root);
    Ok(())
}
