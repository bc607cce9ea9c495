//! NFT Fetcher
//!
//! The public entry point of the pipeline. Locates the base metadata record
//! set for a selector, fans out one enrichment task per record, waits for
//! all of them, and merges the results back onto the base set by mint.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::metaplex;
use crate::domain::enriched::{EnrichedNft, Enrichment};
use crate::domain::merge::{merge_enrichments, MergeError};
use crate::domain::metadata::MetadataRecord;
use crate::domain::progress::{NoopProgress, ProgressEvent, ProgressSink};
use crate::domain::selector::{NftSelector, Selection, SelectorError};
use crate::ports::ledger::{LedgerError, LedgerQuery};
use crate::ports::metadata_fetch::ExternalMetadataFetch;

use super::edition::EditionResolver;
use super::holder::HolderResolver;
use super::tolerate;

/// Fatal pipeline errors. Per-record enrichment failures never surface here;
/// they degrade individual fields instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    InvalidSelector(#[from] SelectorError),

    #[error("metadata lookup failed: {0}")]
    Locate(#[from] LedgerError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Locates and enriches NFT records for one selector per call
#[derive(Clone)]
pub struct NftFetcher {
    ledger: Arc<dyn LedgerQuery>,
    external: Arc<dyn ExternalMetadataFetch>,
    progress: Arc<dyn ProgressSink>,
    editions: EditionResolver,
    holders: HolderResolver,
}

impl NftFetcher {
    pub fn new(ledger: Arc<dyn LedgerQuery>, external: Arc<dyn ExternalMetadataFetch>) -> Self {
        Self {
            editions: EditionResolver::new(Arc::clone(&ledger)),
            holders: HolderResolver::new(Arc::clone(&ledger)),
            ledger,
            external,
            progress: Arc::new(NoopProgress),
        }
    }

    /// Attach a progress sink; the default discards events
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Locate all records matching `selector` and enrich each one.
    ///
    /// Returns the enriched collection in locate order; an empty collection
    /// when nothing matched; or an error when the selector is empty or the
    /// base lookup itself failed.
    pub async fn get_nfts(&self, selector: &NftSelector) -> Result<Vec<EnrichedNft>, FetchError> {
        let selection = selector.resolve()?;
        tracing::info!(selector = %selection, "locating metadata records");

        let base = self.locate(&selection).await?;
        if base.is_empty() {
            tracing::info!("no metadata records matched");
            return Ok(Vec::new());
        }

        self.progress.emit(ProgressEvent::located(base.len() as u64));

        let mut handles = Vec::with_capacity(base.len());
        for record in &base {
            let fetcher = self.clone();
            let record = record.clone();
            handles.push((
                record.mint.clone(),
                tokio::spawn(async move { fetcher.enrich(&record).await }),
            ));
        }

        // Wait for every record, no early return: a panicked task degrades
        // to an all-absent enrichment so the merge invariant holds.
        let mut enrichments = Vec::with_capacity(handles.len());
        for (mint, handle) in handles {
            match handle.await {
                Ok(enrichment) => enrichments.push(enrichment),
                Err(error) => {
                    tracing::warn!(%mint, %error, "enrichment task failed");
                    enrichments.push(Enrichment::empty(mint));
                }
            }
        }

        Ok(merge_enrichments(base, enrichments)?)
    }

    /// Resolve the selection against the ledger index and decode the raw
    /// accounts. Index failures propagate; undecodable accounts are skipped.
    async fn locate(&self, selection: &Selection) -> Result<Vec<MetadataRecord>, FetchError> {
        let raw = match selection {
            Selection::Owner(owner) => self.ledger.metadata_accounts_by_owner(owner).await?,
            Selection::Creators(creators) => {
                let mut all = Vec::new();
                for creator in creators {
                    all.extend(self.ledger.metadata_accounts_by_creator(creator).await?);
                }
                all
            }
            Selection::Mint(mint) => self.ledger.metadata_accounts_by_mint(mint).await?,
            Selection::UpdateAuthority(authority) => {
                self.ledger
                    .metadata_accounts_by_update_authority(authority)
                    .await?
            }
        };

        let mut records = Vec::with_capacity(raw.len());
        for account in raw {
            match metaplex::decode_metadata(&account.address, &account.data) {
                Ok(record) => records.push(record),
                Err(error) => {
                    tracing::warn!(
                        address = %account.address,
                        %error,
                        "skipping undecodable metadata account"
                    );
                }
            }
        }
        Ok(records)
    }

    /// Enrich one record: holder chain, mint decode, external fetch, and
    /// edition resolution run concurrently, each degrading independently.
    async fn enrich(&self, record: &MetadataRecord) -> Enrichment {
        let mint = record.mint.clone();
        let (holder_info, token_mint, external_metadata, edition) = tokio::join!(
            self.holders.resolve(&mint),
            self.holders.resolve_mint(&mint),
            self.fetch_external(record),
            self.editions.resolve(&mint),
        );

        Enrichment {
            mint,
            holder: holder_info.holder,
            token_account: holder_info.token_account,
            token_mint,
            external_metadata,
            edition,
        }
    }

    /// Off-chain JSON fetch; blank URIs are skipped without a request.
    async fn fetch_external(&self, record: &MetadataRecord) -> Option<serde_json::Value> {
        let uri = record.external_uri()?;
        tolerate("external_metadata", &record.mint, self.external.fetch_json(uri)).await
    }
}
