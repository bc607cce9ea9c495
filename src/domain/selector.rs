//! NFT Selector
//!
//! Describes which set of on-chain metadata records a query targets. Exactly
//! one selector kind is honored per call; when several are populated the
//! priority order is owner > creators > mint > update authority.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selector errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("no selector provided: set owner, creators, mint, or update authority")]
    InvalidSelector,
}

/// Query selector for locating metadata records.
///
/// All addresses are base58 strings; validation happens at the RPC boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NftSelector {
    /// Wallet that currently holds the tokens
    pub owner: Option<String>,
    /// Creator addresses (matched at the first-creator position)
    #[serde(default)]
    pub creators: Vec<String>,
    /// Single mint address
    pub mint: Option<String>,
    /// Metadata update authority
    pub update_authority: Option<String>,
}

/// The single selector kind resolved from an [`NftSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Owner(String),
    Creators(Vec<String>),
    Mint(String),
    UpdateAuthority(String),
}

impl NftSelector {
    /// Selector targeting every NFT held by a wallet
    pub fn by_owner(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            ..Default::default()
        }
    }

    /// Selector targeting every NFT with one of the given first creators
    pub fn by_creators<I, S>(creators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            creators: creators.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Selector targeting a single mint
    pub fn by_mint(mint: impl Into<String>) -> Self {
        Self {
            mint: Some(mint.into()),
            ..Default::default()
        }
    }

    /// Selector targeting every NFT under an update authority
    pub fn by_update_authority(authority: impl Into<String>) -> Self {
        Self {
            update_authority: Some(authority.into()),
            ..Default::default()
        }
    }

    /// Resolve to exactly one selection, honoring the priority order.
    ///
    /// An empty creator list counts as unset.
    pub fn resolve(&self) -> Result<Selection, SelectorError> {
        if let Some(owner) = &self.owner {
            return Ok(Selection::Owner(owner.clone()));
        }
        if !self.creators.is_empty() {
            return Ok(Selection::Creators(self.creators.clone()));
        }
        if let Some(mint) = &self.mint {
            return Ok(Selection::Mint(mint.clone()));
        }
        if let Some(authority) = &self.update_authority {
            return Ok(Selection::UpdateAuthority(authority.clone()));
        }
        Err(SelectorError::InvalidSelector)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Owner(owner) => write!(f, "owner {owner}"),
            Selection::Creators(creators) => write!(f, "creators [{}]", creators.join(", ")),
            Selection::Mint(mint) => write!(f, "mint {mint}"),
            Selection::UpdateAuthority(authority) => write!(f, "update authority {authority}"),
        }
    }
}
