//! External Metadata Adapter
//!
//! HTTP retrieval of off-chain JSON metadata documents.

pub mod client;

pub use client::{ExternalClientConfig, ExternalMetadataClient};
