//! Solana Ledger Adapter
//!
//! Implements the ledger query port against a Solana RPC endpoint. The
//! blocking `RpcClient` is wrapped in an `Arc` and every call is bridged
//! with `spawn_blocking` to stay async-compatible.
//!
//! Metadata index queries are `getProgramAccounts` over the Token Metadata
//! program with memcmp filters at fixed layout offsets; owner queries walk
//! the wallet's token accounts and batch-fetch the derived metadata PDAs.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use solana_account_decoder::{UiAccountData, UiAccountEncoding};
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType};
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

use crate::adapters::metaplex;
use crate::ports::ledger::{LedgerError, LedgerQuery, RawAccount, TokenHolderBalance};

/// Offset of the update authority in the metadata layout (after the key byte)
const UPDATE_AUTHORITY_OFFSET: usize = 1;
/// Offset of the mint (key byte + update authority)
const MINT_OFFSET: usize = 33;
/// Offset of the first creator slot: key (1) + update authority (32) +
/// mint (32) + name (4+32) + symbol (4+10) + uri (4+200) + seller fee (2) +
/// creators option (1) + vec length (4)
const FIRST_CREATOR_OFFSET: usize = 326;

/// `getMultipleAccounts` request cap
const MULTIPLE_ACCOUNTS_CHUNK: usize = 100;

/// Ledger adapter backed by a Solana RPC endpoint
#[derive(Clone)]
pub struct SolanaLedger {
    client: Arc<RpcClient>,
}

impl SolanaLedger {
    /// Create an adapter with confirmed commitment
    pub fn new(rpc_url: String) -> Self {
        Self::with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    /// Create an adapter with an explicit commitment level
    pub fn with_commitment(rpc_url: String, commitment: CommitmentConfig) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, commitment));
        Self { client }
    }

    /// getProgramAccounts over the Token Metadata program with a single
    /// memcmp filter matching `address` at `offset`.
    async fn program_accounts_at_offset(
        &self,
        offset: usize,
        address: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        let pubkey = parse_pubkey(address)?;
        let encoded = bs58::encode(pubkey.to_bytes()).into_string();

        let client = Arc::clone(&self.client);
        let accounts = tokio::task::spawn_blocking(move || {
            let config = RpcProgramAccountsConfig {
                filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new(
                    offset,
                    MemcmpEncodedBytes::Base58(encoded),
                ))]),
                account_config: RpcAccountInfoConfig {
                    encoding: Some(UiAccountEncoding::Base64),
                    ..RpcAccountInfoConfig::default()
                },
                ..RpcProgramAccountsConfig::default()
            };
            client
                .get_program_accounts_with_config(&metaplex::id(), config)
                .map_err(|err| LedgerError::Rpc(err.to_string()))
        })
        .await
        .map_err(|err| LedgerError::Rpc(format!("Task join error: {err}")))??;

        Ok(accounts
            .into_iter()
            .map(|(address, account)| RawAccount::new(address.to_string(), account.data))
            .collect())
    }

    /// Mints of the owner's token accounts holding exactly one base unit.
    async fn nft_mints_for_owner(&self, owner: &Pubkey) -> Result<Vec<Pubkey>, LedgerError> {
        let owner = *owner;
        let client = Arc::clone(&self.client);
        let keyed_accounts = tokio::task::spawn_blocking(move || {
            client
                .get_token_accounts_by_owner(&owner, TokenAccountsFilter::ProgramId(spl_token::id()))
                .map_err(|err| LedgerError::Rpc(err.to_string()))
        })
        .await
        .map_err(|err| LedgerError::Rpc(format!("Task join error: {err}")))??;

        let mut mints = Vec::new();
        for keyed in keyed_accounts {
            let UiAccountData::Json(parsed) = keyed.account.data else {
                continue;
            };
            let info = &parsed.parsed["info"];
            let amount = info["tokenAmount"]["amount"].as_str().unwrap_or("0");
            let decimals = info["tokenAmount"]["decimals"].as_u64().unwrap_or(0);
            if amount != "1" || decimals != 0 {
                continue;
            }
            if let Some(mint) = info["mint"].as_str() {
                mints.push(parse_pubkey(mint)?);
            }
        }
        Ok(mints)
    }

    /// Batch-fetch accounts, dropping addresses that do not exist.
    async fn multiple_accounts(
        &self,
        addresses: Vec<Pubkey>,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        let mut found = Vec::with_capacity(addresses.len());
        for chunk in addresses.chunks(MULTIPLE_ACCOUNTS_CHUNK) {
            let chunk = chunk.to_vec();
            let client = Arc::clone(&self.client);
            let accounts = tokio::task::spawn_blocking(move || {
                client
                    .get_multiple_accounts(&chunk)
                    .map(|accounts| {
                        chunk
                            .iter()
                            .zip(accounts)
                            .filter_map(|(address, account)| {
                                account.map(|account| {
                                    RawAccount::new(address.to_string(), account.data)
                                })
                            })
                            .collect::<Vec<_>>()
                    })
                    .map_err(|err| LedgerError::Rpc(err.to_string()))
            })
            .await
            .map_err(|err| LedgerError::Rpc(format!("Task join error: {err}")))??;
            found.extend(accounts);
        }
        Ok(found)
    }
}

#[async_trait]
impl LedgerQuery for SolanaLedger {
    async fn metadata_accounts_by_owner(
        &self,
        owner: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        let owner = parse_pubkey(owner)?;
        let mints = self.nft_mints_for_owner(&owner).await?;
        let addresses = mints
            .iter()
            .map(metaplex::metadata_address_for)
            .collect::<Vec<_>>();
        self.multiple_accounts(addresses).await
    }

    async fn metadata_accounts_by_creator(
        &self,
        creator: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        self.program_accounts_at_offset(FIRST_CREATOR_OFFSET, creator)
            .await
    }

    async fn metadata_accounts_by_mint(&self, mint: &str) -> Result<Vec<RawAccount>, LedgerError> {
        self.program_accounts_at_offset(MINT_OFFSET, mint).await
    }

    async fn metadata_accounts_by_update_authority(
        &self,
        authority: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        self.program_accounts_at_offset(UPDATE_AUTHORITY_OFFSET, authority)
            .await
    }

    async fn account_data(&self, address: &str) -> Result<Vec<u8>, LedgerError> {
        let pubkey = parse_pubkey(address)?;
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_account_data(&pubkey)
                .map_err(|err| LedgerError::Rpc(err.to_string()))
        })
        .await
        .map_err(|err| LedgerError::Rpc(format!("Task join error: {err}")))?
    }

    async fn largest_token_holders(
        &self,
        mint: &str,
    ) -> Result<Vec<TokenHolderBalance>, LedgerError> {
        let pubkey = parse_pubkey(mint)?;
        let client = Arc::clone(&self.client);
        let balances = tokio::task::spawn_blocking(move || {
            client
                .get_token_largest_accounts(&pubkey)
                .map_err(|err| LedgerError::Rpc(err.to_string()))
        })
        .await
        .map_err(|err| LedgerError::Rpc(format!("Task join error: {err}")))??;

        balances
            .into_iter()
            .map(|balance| {
                let amount = balance
                    .amount
                    .amount
                    .parse::<u64>()
                    .map_err(|err| LedgerError::Rpc(format!("Parse error: {err}")))?;
                Ok(TokenHolderBalance {
                    address: balance.address,
                    amount,
                })
            })
            .collect()
    }
}

fn parse_pubkey(address: &str) -> Result<Pubkey, LedgerError> {
    Pubkey::from_str(address).map_err(|_| LedgerError::InvalidPublicKey(address.to_string()))
}
