//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and the pure
//! decode layers:
//! - Solana: RPC-backed ledger queries
//! - Metaplex: Token Metadata account layouts and PDA derivation
//! - Token: SPL token-account and mint layout decoding
//! - External: off-chain JSON metadata fetch
//! - CLI: command-line argument definitions

pub mod cli;
pub mod external;
pub mod metaplex;
pub mod solana;
pub mod token;

pub use cli::CliApp;
pub use external::{ExternalClientConfig, ExternalMetadataClient};
pub use solana::SolanaLedger;
