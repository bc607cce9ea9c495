//! nft-scout - Metaplex NFT Locator and Enrichment Library
//!
//! Locates Token Metadata accounts on Solana by owner, creator, mint, or
//! update authority, then enriches each record with its current holder,
//! token-account/mint state, off-chain JSON metadata, and edition lineage.
//!
//! # Modules
//!
//! - `domain`: Core types (selector, records, editions) and the keyed merge
//! - `ports`: Trait abstractions (LedgerQuery, ExternalMetadataFetch)
//! - `adapters`: External implementations (Solana RPC, Metaplex layouts,
//!   SPL token layouts, HTTP fetch, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: The enrichment pipeline (NftFetcher and its resolvers)

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
