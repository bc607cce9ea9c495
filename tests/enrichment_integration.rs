//! Enrichment Pipeline Integration Tests
//!
//! Drives the full locate -> fan-out -> merge pipeline through the port
//! mocks with fabricated on-chain accounts:
//! 1. Mint selector with a working off-chain document and a full holder chain
//! 2. Partial failures (404 off-chain, missing parent master)
//! 3. Creators union, ordering, and the zero-record short-circuit
//!
//! All tests are deterministic (no real network calls).

use std::sync::Arc;

use solana_sdk::program_option::COption;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use spl_token::state::{Account as SplAccount, AccountState, Mint as SplMint};

use nft_scout::adapters::metaplex::accounts::{
    AccountKey, Creator, Data, Edition, MasterEditionV2, Metadata,
};
use nft_scout::adapters::metaplex::{find_edition_address, find_metadata_address};
use nft_scout::application::{FetchError, NftFetcher};
use nft_scout::domain::edition::EditionInfo;
use nft_scout::domain::selector::NftSelector;
use nft_scout::ports::ledger::{RawAccount, TokenHolderBalance};
use nft_scout::ports::mocks::{MockExternalFetch, MockLedger, RecordingProgress};

// ============================================================================
// Fixtures
// ============================================================================

/// Borsh-serialized metadata account for a mint
fn metadata_account(mint: &Pubkey, name: &str, uri: &str, creator: Option<&Pubkey>) -> RawAccount {
    let creators = creator.map(|address| {
        vec![Creator {
            address: *address,
            verified: true,
            share: 100,
        }]
    });
    let metadata = Metadata {
        key: AccountKey::MetadataV1 as u8,
        update_authority: Pubkey::new_unique(),
        mint: *mint,
        data: Data {
            name: name.to_string(),
            symbol: "EXM".to_string(),
            uri: uri.to_string(),
            seller_fee_basis_points: 500,
            creators,
        },
        primary_sale_happened: true,
        is_mutable: true,
    };
    RawAccount::new(
        find_metadata_address(&mint.to_string()).unwrap(),
        borsh::to_vec(&metadata).unwrap(),
    )
}

fn master_edition_bytes(supply: u64, max_supply: Option<u64>) -> Vec<u8> {
    borsh::to_vec(&MasterEditionV2 {
        key: AccountKey::MasterEditionV2 as u8,
        supply,
        max_supply,
    })
    .unwrap()
}

fn print_edition_bytes(parent: &Pubkey, edition: u64) -> Vec<u8> {
    borsh::to_vec(&Edition {
        key: AccountKey::EditionV1 as u8,
        parent: *parent,
        edition,
    })
    .unwrap()
}

fn token_account_bytes(mint: &Pubkey, owner: &Pubkey) -> Vec<u8> {
    let account = SplAccount {
        mint: *mint,
        owner: *owner,
        amount: 1,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0u8; SplAccount::LEN];
    SplAccount::pack(account, &mut data).unwrap();
    data
}

fn mint_account_bytes() -> Vec<u8> {
    let mint = SplMint {
        mint_authority: COption::None,
        supply: 1,
        decimals: 0,
        is_initialized: true,
        freeze_authority: COption::None,
    };
    let mut data = vec![0u8; SplMint::LEN];
    SplMint::pack(mint, &mut data).unwrap();
    data
}

fn pipeline(ledger: MockLedger, external: MockExternalFetch) -> NftFetcher {
    NftFetcher::new(Arc::new(ledger), Arc::new(external))
}

// ============================================================================
// Full enrichment
// ============================================================================

#[tokio::test]
async fn test_mint_selector_fully_enriched_record() {
    let mint = Pubkey::new_unique();
    let wallet = Pubkey::new_unique();
    let token_account_address = Pubkey::new_unique().to_string();
    let uri = "https://example.com/1.json";

    let ledger = MockLedger::new()
        .with_mint_accounts(
            &mint.to_string(),
            vec![metadata_account(&mint, "Example #1", uri, None)],
        )
        .with_holders(
            &mint.to_string(),
            vec![TokenHolderBalance {
                address: token_account_address.clone(),
                amount: 1,
            }],
        )
        .with_account(&token_account_address, token_account_bytes(&mint, &wallet))
        .with_account(&mint.to_string(), mint_account_bytes())
        .with_account(
            &find_edition_address(&mint.to_string()).unwrap(),
            master_edition_bytes(3, Some(10)),
        );
    let external = MockExternalFetch::new()
        .with_json(uri, serde_json::json!({"name": "Example #1", "image": "https://x/1.png"}));

    let nfts = pipeline(ledger, external)
        .get_nfts(&NftSelector::by_mint(mint.to_string()))
        .await
        .unwrap();

    assert_eq!(nfts.len(), 1);
    let nft = &nfts[0];
    assert_eq!(nft.mint(), mint.to_string());
    assert_eq!(nft.metadata.name, "Example #1");
    assert_eq!(nft.holder, Some(token_account_address));

    let token_account = nft.token_account.as_ref().expect("token account decoded");
    assert_eq!(token_account.owner, wallet.to_string());
    assert_eq!(token_account.amount, 1);

    let token_mint = nft.token_mint.as_ref().expect("mint decoded");
    assert_eq!(token_mint.supply, 1);
    assert_eq!(token_mint.decimals, 0);

    let external_metadata = nft.external_metadata.as_ref().expect("document fetched");
    assert_eq!(external_metadata["image"], "https://x/1.png");

    match &nft.edition {
        EditionInfo::MasterV2 { master, .. } => {
            assert_eq!(master.supply, 3);
            assert_eq!(master.max_supply, Some(10));
        }
        other => panic!("expected MasterV2, got {other:?}"),
    }
}

#[tokio::test]
async fn test_print_with_parent_master_resolved() {
    let mint = Pubkey::new_unique();
    let parent = Pubkey::new_unique();

    let ledger = MockLedger::new()
        .with_mint_accounts(
            &mint.to_string(),
            vec![metadata_account(&mint, "Print #4", "", None)],
        )
        .with_account(
            &find_edition_address(&mint.to_string()).unwrap(),
            print_edition_bytes(&parent, 4),
        )
        .with_account(&parent.to_string(), master_edition_bytes(40, Some(100)));

    let nfts = pipeline(ledger, MockExternalFetch::new())
        .get_nfts(&NftSelector::by_mint(mint.to_string()))
        .await
        .unwrap();

    match &nfts[0].edition {
        EditionInfo::PrintV1 { print, master, .. } => {
            assert_eq!(print.parent, parent.to_string());
            assert_eq!(print.edition, 4);
            assert_eq!(master.as_ref().unwrap().supply, 40);
        }
        other => panic!("expected PrintV1, got {other:?}"),
    }
}

// ============================================================================
// Partial failure
// ============================================================================

#[tokio::test]
async fn test_external_404_degrades_only_that_field() {
    let mint = Pubkey::new_unique();
    let token_account_address = Pubkey::new_unique().to_string();
    let wallet = Pubkey::new_unique();
    let uri = "https://x/1.json";

    let ledger = MockLedger::new()
        .with_mint_accounts(
            &mint.to_string(),
            vec![metadata_account(&mint, "Gone", uri, None)],
        )
        .with_holders(
            &mint.to_string(),
            vec![TokenHolderBalance {
                address: token_account_address.clone(),
                amount: 1,
            }],
        )
        .with_account(&token_account_address, token_account_bytes(&mint, &wallet))
        .with_account(&mint.to_string(), mint_account_bytes())
        .with_account(
            &find_edition_address(&mint.to_string()).unwrap(),
            master_edition_bytes(0, None),
        );
    let external = MockExternalFetch::new().with_status(uri, 404);

    let nfts = pipeline(ledger, external)
        .get_nfts(&NftSelector::by_mint(mint.to_string()))
        .await
        .unwrap();

    assert_eq!(nfts.len(), 1);
    let nft = &nfts[0];
    assert!(nft.external_metadata.is_none());
    assert!(nft.holder.is_some());
    assert!(nft.token_account.is_some());
    assert!(nft.token_mint.is_some());
    assert!(nft.edition.is_master());
}

#[tokio::test]
async fn test_parent_master_network_failure_keeps_print_classification() {
    let mint = Pubkey::new_unique();
    let parent = Pubkey::new_unique();

    let ledger = MockLedger::new()
        .with_mint_accounts(
            &mint.to_string(),
            vec![metadata_account(&mint, "Orphan Print", "", None)],
        )
        .with_account(
            &find_edition_address(&mint.to_string()).unwrap(),
            print_edition_bytes(&parent, 9),
        )
        .with_failing_account(&parent.to_string());

    let nfts = pipeline(ledger, MockExternalFetch::new())
        .get_nfts(&NftSelector::by_mint(mint.to_string()))
        .await
        .unwrap();

    match &nfts[0].edition {
        EditionInfo::PrintV1 { print, master, .. } => {
            assert_eq!(print.edition, 9);
            assert_eq!(print.parent, parent.to_string());
            assert!(master.is_none());
        }
        other => panic!("expected PrintV1, got {other:?}"),
    }
}

#[tokio::test]
async fn test_every_lookup_failing_still_returns_the_record() {
    let mint = Pubkey::new_unique();
    let uri = "https://x/dead.json";

    let ledger = MockLedger::new()
        .with_mint_accounts(
            &mint.to_string(),
            vec![metadata_account(&mint, "Unlucky", uri, None)],
        )
        .with_failing_account(&mint.to_string())
        .with_failing_account(&find_edition_address(&mint.to_string()).unwrap());
    let external = MockExternalFetch::new().with_status(uri, 500);

    let nfts = pipeline(ledger, external)
        .get_nfts(&NftSelector::by_mint(mint.to_string()))
        .await
        .unwrap();

    assert_eq!(nfts.len(), 1);
    let nft = &nfts[0];
    assert_eq!(nft.mint(), mint.to_string());
    assert_eq!(nft.metadata.name, "Unlucky");
    assert!(nft.holder.is_none());
    assert!(nft.token_account.is_none());
    assert!(nft.token_mint.is_none());
    assert!(nft.external_metadata.is_none());
    assert_eq!(nft.edition, EditionInfo::Unknown);
}

// ============================================================================
// Locating and merging
// ============================================================================

#[tokio::test]
async fn test_creators_union_keeps_length_and_order() {
    let creator_one = Pubkey::new_unique();
    let creator_two = Pubkey::new_unique();

    let first_mints: Vec<Pubkey> = (0..9).map(|_| Pubkey::new_unique()).collect();
    let second_mints: Vec<Pubkey> = (0..2).map(|_| Pubkey::new_unique()).collect();

    let accounts_for = |mints: &[Pubkey], creator: &Pubkey| -> Vec<RawAccount> {
        mints
            .iter()
            .map(|mint| metadata_account(mint, "Collection", "", Some(creator)))
            .collect()
    };

    let ledger = MockLedger::new()
        .with_creator_accounts(
            &creator_one.to_string(),
            accounts_for(&first_mints, &creator_one),
        )
        .with_creator_accounts(
            &creator_two.to_string(),
            accounts_for(&second_mints, &creator_two),
        );

    let nfts = pipeline(ledger, MockExternalFetch::new())
        .get_nfts(&NftSelector::by_creators([
            creator_one.to_string(),
            creator_two.to_string(),
        ]))
        .await
        .unwrap();

    assert_eq!(nfts.len(), 11);
    let expected: Vec<String> = first_mints
        .iter()
        .chain(second_mints.iter())
        .map(|mint| mint.to_string())
        .collect();
    let actual: Vec<String> = nfts.iter().map(|nft| nft.mint().to_string()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_zero_records_short_circuits_without_progress() {
    let progress = Arc::new(RecordingProgress::new());
    let ledger = Arc::new(MockLedger::new());
    let fetcher = NftFetcher::new(ledger.clone(), Arc::new(MockExternalFetch::new()))
        .with_progress(progress.clone());

    let nfts = fetcher
        .get_nfts(&NftSelector::by_update_authority(
            Pubkey::new_unique().to_string(),
        ))
        .await
        .unwrap();

    assert!(nfts.is_empty());
    assert!(progress.events().is_empty());
    // Only the locator query ran; no per-record lookups were issued.
    assert_eq!(ledger.calls().len(), 1);
}

#[tokio::test]
async fn test_progress_emitted_once_with_record_count() {
    let mints: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
    let owner = Pubkey::new_unique().to_string();
    let accounts: Vec<RawAccount> = mints
        .iter()
        .map(|mint| metadata_account(mint, "Owned", "", None))
        .collect();

    let progress = Arc::new(RecordingProgress::new());
    let ledger = MockLedger::new().with_owner_accounts(&owner, accounts);
    let fetcher = NftFetcher::new(Arc::new(ledger), Arc::new(MockExternalFetch::new()))
        .with_progress(progress.clone());

    let nfts = fetcher
        .get_nfts(&NftSelector::by_owner(owner))
        .await
        .unwrap();
    assert_eq!(nfts.len(), 3);

    let events = progress.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].max_progress, 3);
    assert_eq!(events[0].progress, 0);
}

#[tokio::test]
async fn test_empty_selector_is_rejected() {
    let fetcher = pipeline(MockLedger::new(), MockExternalFetch::new());
    let result = fetcher.get_nfts(&NftSelector::default()).await;
    assert!(matches!(result, Err(FetchError::InvalidSelector(_))));
}

#[tokio::test]
async fn test_locator_failure_is_fatal() {
    let ledger = MockLedger::new().with_locate_failure("index unavailable");
    let fetcher = pipeline(ledger, MockExternalFetch::new());

    let result = fetcher
        .get_nfts(&NftSelector::by_owner(Pubkey::new_unique().to_string()))
        .await;
    assert!(matches!(result, Err(FetchError::Locate(_))));
}
