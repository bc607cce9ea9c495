//! Application Layer - Enrichment pipeline
//!
//! `NftFetcher` is the public entry point: it locates the base record set
//! for a selector, fans out per-record enrichment, and merges the results.
//! The edition and holder resolvers are its per-record collaborators.

pub mod edition;
pub mod fetcher;
pub mod holder;

pub use edition::EditionResolver;
pub use fetcher::{FetchError, NftFetcher};
pub use holder::HolderResolver;

use std::future::Future;

/// Run one fallible enrichment lookup, degrading any error to `None`.
///
/// Every per-record sub-lookup goes through this adapter so a malformed or
/// unreachable account degrades that one field instead of aborting the
/// record or the batch.
pub(crate) async fn tolerate<T, E, F>(field: &'static str, mint: &str, operation: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match operation.await {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(mint, field, %error, "enrichment lookup degraded");
            None
        }
    }
}
