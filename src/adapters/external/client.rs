//! External Metadata Client
//!
//! Fetches the off-chain JSON metadata document referenced by an on-chain
//! URI. One GET per call, no retries; the transport timeout comes from
//! configuration.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::ports::metadata_fetch::{ExternalFetchError, ExternalMetadataFetch};

/// Configuration for the external metadata client
#[derive(Debug, Clone)]
pub struct ExternalClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent sent with each request
    pub user_agent: String,
}

impl Default for ExternalClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("nft-scout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ExternalClientConfig {
    /// Create config with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }
}

/// HTTP client for off-chain metadata documents
#[derive(Debug, Clone)]
pub struct ExternalMetadataClient {
    config: ExternalClientConfig,
    http: Client,
}

impl ExternalMetadataClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, ExternalFetchError> {
        Self::with_config(ExternalClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ExternalClientConfig) -> Result<Self, ExternalFetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| ExternalFetchError::Http(err.to_string()))?;

        Ok(Self { config, http })
    }

    /// The configured request timeout
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }
}

#[async_trait]
impl ExternalMetadataFetch for ExternalMetadataClient {
    async fn fetch_json(&self, uri: &str) -> Result<serde_json::Value, ExternalFetchError> {
        let response = self
            .http
            .get(uri)
            .send()
            .await
            .map_err(|err| ExternalFetchError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExternalFetchError::Status(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| ExternalFetchError::Parse(err.to_string()))
    }
}
