//! Holder and Token Account Data
//!
//! Decoded SPL token-account and mint state attached to an enriched record.
//! The holder is the top-ranked account by balance; NFTs are single-supply
//! so this is expected to be unique, but the lookup takes the first ranked
//! entry without verifying the amount.

use serde::{Deserialize, Serialize};

/// Token account state, mirroring `spl_token::state::AccountState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenAccountState {
    Uninitialized,
    Initialized,
    Frozen,
}

/// Decoded SPL token-account layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountInfo {
    pub mint: String,
    pub owner: String,
    pub amount: u64,
    pub state: TokenAccountState,
    pub delegate: Option<String>,
    pub delegated_amount: u64,
}

/// Decoded SPL mint layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMintInfo {
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    /// `None` means the authority has been revoked
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
}

/// Result of the holder lookup chain for one mint.
///
/// `holder` may be present with `token_account` absent when the account
/// fetch or decode failed after the ranked-holder query succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderInfo {
    pub holder: Option<String>,
    pub token_account: Option<TokenAccountInfo>,
}
