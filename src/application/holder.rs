//! Holder Lookup
//!
//! Finds the current holder of a mint from the ranked-by-balance account
//! list and decodes the token-account and mint layouts. The lookup takes the
//! first ranked entry without verifying the amount; NFTs are single-supply
//! so the top holder is expected to be the sole one.

use std::sync::Arc;

use crate::adapters::token;
use crate::domain::holder::{HolderInfo, TokenMintInfo};
use crate::ports::ledger::LedgerQuery;

use super::tolerate;

/// Resolves holder and token-account state for one mint at a time
#[derive(Clone)]
pub struct HolderResolver {
    ledger: Arc<dyn LedgerQuery>,
}

impl HolderResolver {
    pub fn new(ledger: Arc<dyn LedgerQuery>) -> Self {
        Self { ledger }
    }

    /// Top-ranked holder plus its decoded token account.
    ///
    /// The ranked query, the account fetch, and the decode are independently
    /// tolerated: a decode failure still reports the holder address.
    pub async fn resolve(&self, mint: &str) -> HolderInfo {
        let holders = tolerate(
            "largest_holders",
            mint,
            self.ledger.largest_token_holders(mint),
        )
        .await
        .unwrap_or_default();

        let Some(top) = holders.into_iter().next() else {
            return HolderInfo::default();
        };

        let token_account = match tolerate(
            "token_account",
            mint,
            self.ledger.account_data(&top.address),
        )
        .await
        {
            Some(data) => {
                tolerate("token_account_decode", mint, async move {
                    token::decode_token_account(&data)
                })
                .await
            }
            None => None,
        };

        HolderInfo {
            holder: Some(top.address),
            token_account,
        }
    }

    /// Decode the mint account's supply/decimals layout.
    pub async fn resolve_mint(&self, mint: &str) -> Option<TokenMintInfo> {
        let data = tolerate("mint_account", mint, self.ledger.account_data(mint)).await?;
        tolerate("mint_decode", mint, async move { token::decode_mint(&data) }).await
    }
}
