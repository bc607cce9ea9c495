//! CLI Command Definitions
//!
//! Argument parsing for the nft-scout commands, plus the JSON report
//! envelope the fetch command writes.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::domain::enriched::EnrichedNft;
use crate::domain::selector::NftSelector;

/// nft-scout - Metaplex NFT locator and enrichment pipeline for Solana
#[derive(Parser, Debug)]
#[command(
    name = "nft-scout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Locate and enrich Metaplex NFT records on Solana",
    long_about = "nft-scout locates Token Metadata accounts by owner, creator, mint, or \
                  update authority, then enriches every record with its current holder, \
                  token-account and mint state, off-chain JSON metadata, and edition lineage."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Locate and enrich all NFTs matching a selector
    Fetch(FetchCmd),

    /// Inspect the edition lineage of a single mint
    Edition(EditionCmd),

    /// Inspect the current holder of a single mint
    Holder(HolderCmd),
}

/// Locate and enrich NFT records
#[derive(Parser, Debug)]
pub struct FetchCmd {
    /// Wallet that currently holds the tokens
    #[arg(long, value_name = "PUBKEY")]
    pub owner: Option<String>,

    /// First-position creator address (repeatable)
    #[arg(long = "creator", value_name = "PUBKEY")]
    pub creators: Vec<String>,

    /// Single mint address
    #[arg(long, value_name = "PUBKEY")]
    pub mint: Option<String>,

    /// Metadata update authority
    #[arg(long, value_name = "PUBKEY")]
    pub update_authority: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/mainnet.toml")]
    pub config: PathBuf,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl FetchCmd {
    /// Build the selector from the supplied flags; priority resolution
    /// happens in the domain layer.
    pub fn selector(&self) -> NftSelector {
        NftSelector {
            owner: self.owner.clone(),
            creators: self.creators.clone(),
            mint: self.mint.clone(),
            update_authority: self.update_authority.clone(),
        }
    }
}

/// Inspect edition lineage
#[derive(Parser, Debug)]
pub struct EditionCmd {
    /// Mint address
    #[arg(value_name = "MINT")]
    pub mint: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/mainnet.toml")]
    pub config: PathBuf,
}

/// Inspect current holder
#[derive(Parser, Debug)]
pub struct HolderCmd {
    /// Mint address
    #[arg(value_name = "MINT")]
    pub mint: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/mainnet.toml")]
    pub config: PathBuf,
}

/// JSON envelope written by the fetch command
#[derive(Debug, Serialize)]
pub struct FetchReport {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub nfts: Vec<EnrichedNft>,
}

impl FetchReport {
    pub fn new(nfts: Vec<EnrichedNft>) -> Self {
        Self {
            generated_at: Utc::now(),
            count: nfts.len(),
            nfts,
        }
    }
}
