//! Ledger Query Port
//!
//! Interface to the ledger index and account store consumed by the locator,
//! the holder lookup, and the edition resolver. Each call is independently
//! fallible; the adapter decides transport and encoding.

use async_trait::async_trait;
use thiserror::Error;

/// Ledger query errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),
}

/// Raw account bytes paired with the address they were read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAccount {
    pub address: String,
    pub data: Vec<u8>,
}

impl RawAccount {
    pub fn new(address: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            address: address.into(),
            data,
        }
    }
}

/// One entry of the ranked-by-balance holder list for a mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHolderBalance {
    pub address: String,
    pub amount: u64,
}

/// Ledger index and account queries.
///
/// The `metadata_accounts_by_*` family returns the complete matching set of
/// raw Token Metadata accounts, or fails as a whole; an empty result is
/// valid and distinct from failure.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    async fn metadata_accounts_by_owner(&self, owner: &str)
        -> Result<Vec<RawAccount>, LedgerError>;

    /// Records whose first creator slot matches `creator`
    async fn metadata_accounts_by_creator(
        &self,
        creator: &str,
    ) -> Result<Vec<RawAccount>, LedgerError>;

    async fn metadata_accounts_by_mint(&self, mint: &str) -> Result<Vec<RawAccount>, LedgerError>;

    async fn metadata_accounts_by_update_authority(
        &self,
        authority: &str,
    ) -> Result<Vec<RawAccount>, LedgerError>;

    /// Raw bytes of a single account
    async fn account_data(&self, address: &str) -> Result<Vec<u8>, LedgerError>;

    /// Token accounts for `mint` ranked by balance, largest first
    async fn largest_token_holders(
        &self,
        mint: &str,
    ) -> Result<Vec<TokenHolderBalance>, LedgerError>;
}
