//! Base/Enrichment Merge
//!
//! Recombines the ordered base record set with the unordered enrichment
//! results. Enrichments are indexed by mint, then the base sequence is
//! projected in its original order, so the output always has the same length
//! and order as the input. A base mint with no enrichment entry is an
//! internal invariant violation and is surfaced, never silently dropped.

use std::collections::HashMap;

use thiserror::Error;

use super::enriched::{EnrichedNft, Enrichment};
use super::metadata::MetadataRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("no enrichment produced for mint {0}")]
    MissingEnrichment(String),
}

/// Join enrichments onto the base set by mint, preserving base order.
pub fn merge_enrichments(
    base: Vec<MetadataRecord>,
    enrichments: Vec<Enrichment>,
) -> Result<Vec<EnrichedNft>, MergeError> {
    let by_mint: HashMap<String, Enrichment> = enrichments
        .into_iter()
        .map(|enrichment| (enrichment.mint.clone(), enrichment))
        .collect();

    base.into_iter()
        .map(|record| {
            // Lookup clones so a duplicated base mint still gets its enrichment.
            let enrichment = by_mint
                .get(&record.mint)
                .cloned()
                .ok_or_else(|| MergeError::MissingEnrichment(record.mint.clone()))?;
            Ok(EnrichedNft::from_parts(record, enrichment))
        })
        .collect()
}
