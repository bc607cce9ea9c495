//! External Metadata Fetch Port
//!
//! Single GET-and-parse-JSON operation for the off-chain metadata document
//! referenced by an on-chain URI.

use async_trait::async_trait;
use thiserror::Error;

/// External fetch errors
#[derive(Debug, Error)]
pub enum ExternalFetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    #[error("failed to parse response JSON: {0}")]
    Parse(String),
}

/// Fetches and parses one off-chain JSON document. No retries, no schema
/// validation; the document shape is whatever the host serves.
#[async_trait]
pub trait ExternalMetadataFetch: Send + Sync {
    async fn fetch_json(&self, uri: &str) -> Result<serde_json::Value, ExternalFetchError>;
}
