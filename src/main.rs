//! nft-scout - Metaplex NFT Locator and Enrichment CLI
//!
//! Locates Token Metadata accounts by owner, creator, mint, or update
//! authority and enriches every record before writing a JSON report.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use solana_sdk::commitment_config::CommitmentConfig;
use tracing_subscriber::{fmt, EnvFilter};

use nft_scout::adapters::cli::{CliApp, Command, EditionCmd, FetchCmd, FetchReport, HolderCmd};
use nft_scout::adapters::{ExternalClientConfig, ExternalMetadataClient, SolanaLedger};
use nft_scout::application::{EditionResolver, HolderResolver, NftFetcher};
use nft_scout::config::{load_config, Config};
use nft_scout::domain::progress::LogProgress;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (endpoint overrides go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    match app.command {
        Command::Fetch(cmd) => fetch_command(cmd, app.verbose, app.debug).await,
        Command::Edition(cmd) => edition_command(cmd, app.verbose, app.debug).await,
        Command::Holder(cmd) => holder_command(cmd, app.verbose, app.debug).await,
    }
}

/// Initialize logging; CLI flags override the configured level
fn init_logging(config_level: &str, verbose: bool, debug: bool) -> Result<()> {
    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        config_level
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt().with_env_filter(filter).init();
    Ok(())
}

fn load_config_expanded(path: &Path) -> Result<Config> {
    let expanded = shellexpand::tilde(&path.display().to_string()).to_string();
    load_config(&expanded).context("Failed to load configuration")
}

fn parse_commitment(level: &str) -> CommitmentConfig {
    match level {
        "processed" => CommitmentConfig::processed(),
        "finalized" => CommitmentConfig::finalized(),
        _ => CommitmentConfig::confirmed(),
    }
}

/// Build the ledger and HTTP adapters from config
fn build_adapters(config: &Config) -> Result<(Arc<SolanaLedger>, Arc<ExternalMetadataClient>)> {
    let ledger = Arc::new(SolanaLedger::with_commitment(
        config.solana.get_rpc_url(),
        parse_commitment(&config.solana.commitment),
    ));
    let external = Arc::new(
        ExternalMetadataClient::with_config(ExternalClientConfig::with_timeout(
            Duration::from_secs(config.external.timeout_secs),
        ))
        .context("Failed to create HTTP client")?,
    );
    Ok((ledger, external))
}

async fn fetch_command(cmd: FetchCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config_expanded(&cmd.config)?;
    init_logging(&config.logging.level, verbose, debug)?;

    let (ledger, external) = build_adapters(&config)?;
    let fetcher = NftFetcher::new(ledger, external).with_progress(Arc::new(LogProgress));

    let nfts = fetcher
        .get_nfts(&cmd.selector())
        .await
        .context("Enrichment pipeline failed")?;

    let report = FetchReport::new(nfts);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;

    match &cmd.output {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.display().to_string()).to_string();
            std::fs::write(&expanded, json)
                .with_context(|| format!("Failed to write report to {expanded}"))?;
            tracing::info!(count = report.count, path = %expanded, "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

async fn edition_command(cmd: EditionCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config_expanded(&cmd.config)?;
    init_logging(&config.logging.level, verbose, debug)?;

    let (ledger, _) = build_adapters(&config)?;
    let resolver = EditionResolver::new(ledger);

    let info = resolver.resolve(&cmd.mint).await;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

async fn holder_command(cmd: HolderCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config_expanded(&cmd.config)?;
    init_logging(&config.logging.level, verbose, debug)?;

    let (ledger, _) = build_adapters(&config)?;
    let resolver = HolderResolver::new(ledger);

    let holder = resolver.resolve(&cmd.mint).await;
    let token_mint = resolver.resolve_mint(&cmd.mint).await;
    let report = serde_json::json!({
        "mint": cmd.mint,
        "holder": holder.holder,
        "token_account": holder.token_account,
        "token_mint": token_mint,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
