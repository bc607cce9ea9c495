//! Enriched NFT Records
//!
//! `Enrichment` is the per-record bundle produced by the concurrent lookups;
//! `EnrichedNft` is the final join of a base metadata record with its
//! enrichment. Both are keyed by mint.

use serde::{Deserialize, Serialize};

use super::edition::EditionInfo;
use super::holder::{TokenAccountInfo, TokenMintInfo};
use super::metadata::MetadataRecord;

/// Enrichment results for one mint. Every field except the key degrades to
/// absent (or `Unknown` for the edition) when its lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub mint: String,
    pub holder: Option<String>,
    pub token_account: Option<TokenAccountInfo>,
    pub token_mint: Option<TokenMintInfo>,
    pub external_metadata: Option<serde_json::Value>,
    pub edition: EditionInfo,
}

impl Enrichment {
    /// All-absent enrichment for a mint whose every lookup failed
    pub fn empty(mint: impl Into<String>) -> Self {
        Self {
            mint: mint.into(),
            holder: None,
            token_account: None,
            token_mint: None,
            external_metadata: None,
            edition: EditionInfo::Unknown,
        }
    }
}

/// Final output record: base metadata plus enrichment, keyed by mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedNft {
    #[serde(flatten)]
    pub metadata: MetadataRecord,
    pub holder: Option<String>,
    pub token_account: Option<TokenAccountInfo>,
    pub token_mint: Option<TokenMintInfo>,
    pub external_metadata: Option<serde_json::Value>,
    pub edition: EditionInfo,
}

impl EnrichedNft {
    /// Join one base record with its enrichment. The caller has already
    /// matched the keys; this only assembles the output shape.
    pub fn from_parts(metadata: MetadataRecord, enrichment: Enrichment) -> Self {
        Self {
            metadata,
            holder: enrichment.holder,
            token_account: enrichment.token_account,
            token_mint: enrichment.token_mint,
            external_metadata: enrichment.external_metadata,
            edition: enrichment.edition,
        }
    }

    pub fn mint(&self) -> &str {
        &self.metadata.mint
    }
}
