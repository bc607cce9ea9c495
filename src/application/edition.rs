//! Edition Resolver
//!
//! Classifies a token's edition account and, for numbered prints, resolves
//! the parent master edition. The primary lookup decides the classification;
//! the parent lookup is best-effort and can fail without demoting a print to
//! unknown.

use std::sync::Arc;

use crate::adapters::metaplex::{self, AccountKey};
use crate::domain::edition::{EditionInfo, MasterEditionData};
use crate::ports::ledger::LedgerQuery;

use super::tolerate;

/// Resolves edition lineage for one mint at a time
#[derive(Clone)]
pub struct EditionResolver {
    ledger: Arc<dyn LedgerQuery>,
}

impl EditionResolver {
    pub fn new(ledger: Arc<dyn LedgerQuery>) -> Self {
        Self { ledger }
    }

    /// Classify the edition account derived from `mint`.
    ///
    /// A missing or unreadable primary account yields `Unknown`; master tags
    /// never trigger a second fetch.
    pub async fn resolve(&self, mint: &str) -> EditionInfo {
        let edition_address = match metaplex::find_edition_address(mint) {
            Ok(address) => address,
            Err(error) => {
                tracing::debug!(mint, %error, "edition address derivation failed");
                return EditionInfo::Unknown;
            }
        };

        let Some(data) = tolerate(
            "edition_account",
            mint,
            self.ledger.account_data(&edition_address),
        )
        .await
        else {
            return EditionInfo::Unknown;
        };

        match metaplex::account_key(&data) {
            Ok(AccountKey::MasterEditionV1 | AccountKey::MasterEditionV2) => {
                let Some((key, master)) = tolerate("master_edition_decode", mint, async {
                    metaplex::decode_master_edition(&data)
                })
                .await
                else {
                    return EditionInfo::Unknown;
                };
                match key {
                    AccountKey::MasterEditionV1 => EditionInfo::MasterV1 {
                        edition_address,
                        master,
                    },
                    _ => EditionInfo::MasterV2 {
                        edition_address,
                        master,
                    },
                }
            }
            Ok(AccountKey::EditionV1) => {
                let Some(print) = tolerate("print_edition_decode", mint, async {
                    metaplex::decode_print_edition(&data)
                })
                .await
                else {
                    return EditionInfo::Unknown;
                };
                let master = self.resolve_parent_master(mint, &print.parent).await;
                EditionInfo::PrintV1 {
                    edition_address,
                    print,
                    master,
                }
            }
            Ok(other) => {
                tracing::debug!(mint, key = ?other, "account is not an edition");
                EditionInfo::Unknown
            }
            Err(error) => {
                tracing::debug!(mint, %error, "edition account classification failed");
                EditionInfo::Unknown
            }
        }
    }

    /// Best-effort second-level fetch of a print's parent master edition.
    async fn resolve_parent_master(&self, mint: &str, parent: &str) -> Option<MasterEditionData> {
        let data = tolerate(
            "master_edition_account",
            mint,
            self.ledger.account_data(parent),
        )
        .await?;
        tolerate("parent_master_decode", mint, async {
            metaplex::decode_master_edition(&data).map(|(_, master)| master)
        })
        .await
    }
}
