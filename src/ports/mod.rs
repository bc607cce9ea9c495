//! Ports Layer - Trait definitions for external collaborators
//!
//! Following hexagonal architecture, these traits abstract:
//! - The ledger index and account store (metadata queries, raw accounts,
//!   ranked holders)
//! - The off-chain metadata fetch (single GET-and-parse-JSON)
//!
//! `mocks` ships recording fakes for both, shared by unit and integration
//! tests.

pub mod ledger;
pub mod metadata_fetch;
pub mod mocks;

pub use ledger::{LedgerError, LedgerQuery, RawAccount, TokenHolderBalance};
pub use metadata_fetch::{ExternalFetchError, ExternalMetadataFetch};
