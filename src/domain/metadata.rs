//! On-Chain Metadata Records
//!
//! Typed view of a Token Metadata account after decoding. Identity for the
//! whole pipeline is the mint address; the metadata address is the PDA the
//! record was read from.

use serde::{Deserialize, Serialize};

/// A creator entry from the on-chain metadata record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub address: String,
    pub verified: bool,
    /// Royalty share in percent, 0-100
    pub share: u8,
}

/// One decoded Token Metadata account.
///
/// Immutable once produced by the locator; string fields are already
/// NUL-trimmed (on-chain data pads them to fixed widths).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Mint address, the record's identity key
    pub mint: String,
    /// Address of the metadata PDA this record was decoded from
    pub metadata_address: String,
    pub update_authority: String,
    pub name: String,
    pub symbol: String,
    /// Off-chain JSON metadata URI; may be blank
    pub uri: String,
    pub seller_fee_basis_points: u16,
    #[serde(default)]
    pub creators: Vec<Creator>,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
}

impl MetadataRecord {
    /// The off-chain URI, or `None` when the on-chain field is blank.
    pub fn external_uri(&self) -> Option<&str> {
        let trimmed = self.uri.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}
