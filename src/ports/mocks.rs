//! Port Mocks
//!
//! Hand-rolled mocks that record calls and return controlled responses.
//! Used by the application unit tests and the integration tests; all state
//! sits behind `Arc<Mutex<_>>` so mocks can be shared across spawned tasks.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::progress::{ProgressEvent, ProgressSink};
use crate::ports::ledger::{LedgerError, LedgerQuery, RawAccount, TokenHolderBalance};
use crate::ports::metadata_fetch::{ExternalFetchError, ExternalMetadataFetch};

/// Mock ledger with per-selector fixtures and per-address failure injection
#[derive(Debug, Default)]
pub struct MockLedger {
    by_owner: Arc<Mutex<HashMap<String, Vec<RawAccount>>>>,
    by_creator: Arc<Mutex<HashMap<String, Vec<RawAccount>>>>,
    by_mint: Arc<Mutex<HashMap<String, Vec<RawAccount>>>>,
    by_update_authority: Arc<Mutex<HashMap<String, Vec<RawAccount>>>>,
    accounts: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    holders: Arc<Mutex<HashMap<String, Vec<TokenHolderBalance>>>>,
    failing_accounts: Arc<Mutex<HashSet<String>>>,
    locate_failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: metadata accounts returned for an owner query
    pub fn with_owner_accounts(self, owner: &str, accounts: Vec<RawAccount>) -> Self {
        self.by_owner.lock().unwrap().insert(owner.to_string(), accounts);
        self
    }

    /// Builder: metadata accounts returned for a first-creator query
    pub fn with_creator_accounts(self, creator: &str, accounts: Vec<RawAccount>) -> Self {
        self.by_creator
            .lock()
            .unwrap()
            .insert(creator.to_string(), accounts);
        self
    }

    /// Builder: metadata accounts returned for a mint query
    pub fn with_mint_accounts(self, mint: &str, accounts: Vec<RawAccount>) -> Self {
        self.by_mint.lock().unwrap().insert(mint.to_string(), accounts);
        self
    }

    /// Builder: metadata accounts returned for an update-authority query
    pub fn with_update_authority_accounts(self, authority: &str, accounts: Vec<RawAccount>) -> Self {
        self.by_update_authority
            .lock()
            .unwrap()
            .insert(authority.to_string(), accounts);
        self
    }

    /// Builder: raw bytes served for one account address
    pub fn with_account(self, address: &str, data: Vec<u8>) -> Self {
        self.accounts.lock().unwrap().insert(address.to_string(), data);
        self
    }

    /// Builder: ranked holder list for a mint
    pub fn with_holders(self, mint: &str, holders: Vec<TokenHolderBalance>) -> Self {
        self.holders.lock().unwrap().insert(mint.to_string(), holders);
        self
    }

    /// Builder: make `account_data` fail for one address
    pub fn with_failing_account(self, address: &str) -> Self {
        self.failing_accounts
            .lock()
            .unwrap()
            .insert(address.to_string());
        self
    }

    /// Builder: make every locator query fail
    pub fn with_locate_failure(self, message: &str) -> Self {
        *self.locate_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// All recorded calls, as `method:argument` strings in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls whose method segment matches `method`
    pub fn call_count(&self, method: &str) -> usize {
        let prefix = format!("{method}:");
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(&prefix))
            .count()
    }

    fn record(&self, method: &str, argument: &str) {
        self.calls.lock().unwrap().push(format!("{method}:{argument}"));
    }

    fn locate(
        &self,
        map: &Mutex<HashMap<String, Vec<RawAccount>>>,
        key: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        if let Some(message) = self.locate_failure.lock().unwrap().clone() {
            return Err(LedgerError::Rpc(message));
        }
        Ok(map.lock().unwrap().get(key).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl LedgerQuery for MockLedger {
    async fn metadata_accounts_by_owner(
        &self,
        owner: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        self.record("metadata_accounts_by_owner", owner);
        self.locate(&self.by_owner, owner)
    }

    async fn metadata_accounts_by_creator(
        &self,
        creator: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        self.record("metadata_accounts_by_creator", creator);
        self.locate(&self.by_creator, creator)
    }

    async fn metadata_accounts_by_mint(&self, mint: &str) -> Result<Vec<RawAccount>, LedgerError> {
        self.record("metadata_accounts_by_mint", mint);
        self.locate(&self.by_mint, mint)
    }

    async fn metadata_accounts_by_update_authority(
        &self,
        authority: &str,
    ) -> Result<Vec<RawAccount>, LedgerError> {
        self.record("metadata_accounts_by_update_authority", authority);
        self.locate(&self.by_update_authority, authority)
    }

    async fn account_data(&self, address: &str) -> Result<Vec<u8>, LedgerError> {
        self.record("account_data", address);
        if self.failing_accounts.lock().unwrap().contains(address) {
            return Err(LedgerError::Rpc(format!("injected failure for {address}")));
        }
        self.accounts
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))
    }

    async fn largest_token_holders(
        &self,
        mint: &str,
    ) -> Result<Vec<TokenHolderBalance>, LedgerError> {
        self.record("largest_token_holders", mint);
        if self.failing_accounts.lock().unwrap().contains(mint) {
            return Err(LedgerError::Rpc(format!("injected failure for {mint}")));
        }
        Ok(self
            .holders
            .lock()
            .unwrap()
            .get(mint)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock off-chain metadata fetcher
#[derive(Debug, Default)]
pub struct MockExternalFetch {
    responses: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    status_failures: Arc<Mutex<HashMap<String, u16>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockExternalFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: JSON document served for a URI
    pub fn with_json(self, uri: &str, document: serde_json::Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(uri.to_string(), document);
        self
    }

    /// Builder: HTTP status failure for a URI
    pub fn with_status(self, uri: &str, status: u16) -> Self {
        self.status_failures
            .lock()
            .unwrap()
            .insert(uri.to_string(), status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExternalMetadataFetch for MockExternalFetch {
    async fn fetch_json(&self, uri: &str) -> Result<serde_json::Value, ExternalFetchError> {
        self.calls.lock().unwrap().push(uri.to_string());
        if let Some(status) = self.status_failures.lock().unwrap().get(uri) {
            return Err(ExternalFetchError::Status(*status));
        }
        self.responses
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or_else(|| ExternalFetchError::Http(format!("no response configured for {uri}")))
    }
}

/// Progress sink that records every event
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
