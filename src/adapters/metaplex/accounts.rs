//! Token Metadata Account Layouts
//!
//! Borsh layouts for the Metaplex Token Metadata program accounts we read:
//! metadata records, numbered print editions, and master editions v1/v2.
//! Every account leads with a one-byte key discriminator; decoding reads the
//! layout as a prefix of the account data, since on-chain accounts carry
//! trailing padding and later-appended optional fields.

use borsh::{BorshDeserialize, BorshSerialize};
use num_enum::TryFromPrimitive;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::domain::edition::{MasterEditionData, PrintEditionData};
use crate::domain::metadata::{Creator as DomainCreator, MetadataRecord};

/// Decode errors for Token Metadata account layouts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("account data is empty")]
    Empty,

    #[error("unknown account key tag: {0}")]
    UnknownKey(u8),

    #[error("expected {expected:?} account, found {found:?}")]
    WrongKey {
        expected: AccountKey,
        found: AccountKey,
    },

    #[error("malformed account data: {0}")]
    Malformed(String),
}

/// Leading discriminator byte of every Token Metadata program account
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum AccountKey {
    Uninitialized,
    EditionV1,
    MasterEditionV1,
    ReservationListV1,
    MetadataV1,
    ReservationListV2,
    MasterEditionV2,
    EditionMarker,
    UseAuthorityRecord,
    CollectionAuthorityRecord,
}

/// Read and classify the leading key byte.
pub fn account_key(data: &[u8]) -> Result<AccountKey, DecodeError> {
    let tag = *data.first().ok_or(DecodeError::Empty)?;
    AccountKey::try_from(tag).map_err(|_| DecodeError::UnknownKey(tag))
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    pub share: u8,
}

/// The variable-width payload of a metadata record. On-chain strings are
/// padded to fixed widths with NULs.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Data {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Metadata {
    pub key: u8,
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub data: Data,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
}

/// A numbered print, pointing at its parent master edition
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Edition {
    pub key: u8,
    pub parent: Pubkey,
    pub edition: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct MasterEditionV2 {
    pub key: u8,
    pub supply: u64,
    pub max_supply: Option<u64>,
}

/// Deprecated v1 master edition; still present on old collections
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct MasterEditionV1 {
    pub key: u8,
    pub supply: u64,
    pub max_supply: Option<u64>,
    pub printing_mint: Pubkey,
    pub one_time_printing_authorization_mint: Pubkey,
}

fn deserialize_prefix<T: BorshDeserialize>(data: &[u8]) -> Result<T, DecodeError> {
    let mut slice = data;
    T::deserialize(&mut slice).map_err(|err| DecodeError::Malformed(err.to_string()))
}

fn expect_key(data: &[u8], expected: AccountKey) -> Result<(), DecodeError> {
    let found = account_key(data)?;
    if found != expected {
        return Err(DecodeError::WrongKey { expected, found });
    }
    Ok(())
}

/// Decode a metadata account into the domain record.
pub fn decode_metadata(metadata_address: &str, data: &[u8]) -> Result<MetadataRecord, DecodeError> {
    expect_key(data, AccountKey::MetadataV1)?;
    let metadata: Metadata = deserialize_prefix(data)?;

    let creators = metadata
        .data
        .creators
        .unwrap_or_default()
        .into_iter()
        .map(|creator| DomainCreator {
            address: creator.address.to_string(),
            verified: creator.verified,
            share: creator.share,
        })
        .collect();

    Ok(MetadataRecord {
        mint: metadata.mint.to_string(),
        metadata_address: metadata_address.to_string(),
        update_authority: metadata.update_authority.to_string(),
        name: trim_padding(&metadata.data.name),
        symbol: trim_padding(&metadata.data.symbol),
        uri: trim_padding(&metadata.data.uri),
        seller_fee_basis_points: metadata.data.seller_fee_basis_points,
        creators,
        primary_sale_happened: metadata.primary_sale_happened,
        is_mutable: metadata.is_mutable,
    })
}

/// Decode a numbered print edition account.
pub fn decode_print_edition(data: &[u8]) -> Result<PrintEditionData, DecodeError> {
    expect_key(data, AccountKey::EditionV1)?;
    let edition: Edition = deserialize_prefix(data)?;
    Ok(PrintEditionData {
        parent: edition.parent.to_string(),
        edition: edition.edition,
    })
}

/// Decode a master edition account of either version, classified by its tag.
pub fn decode_master_edition(data: &[u8]) -> Result<(AccountKey, MasterEditionData), DecodeError> {
    match account_key(data)? {
        AccountKey::MasterEditionV1 => {
            let master: MasterEditionV1 = deserialize_prefix(data)?;
            Ok((
                AccountKey::MasterEditionV1,
                MasterEditionData {
                    supply: master.supply,
                    max_supply: master.max_supply,
                },
            ))
        }
        AccountKey::MasterEditionV2 => {
            let master: MasterEditionV2 = deserialize_prefix(data)?;
            Ok((
                AccountKey::MasterEditionV2,
                MasterEditionData {
                    supply: master.supply,
                    max_supply: master.max_supply,
                },
            ))
        }
        found => Err(DecodeError::WrongKey {
            expected: AccountKey::MasterEditionV2,
            found,
        }),
    }
}

fn trim_padding(value: &str) -> String {
    value.trim_end_matches('\0').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_bytes(
        mint: &Pubkey,
        update_authority: &Pubkey,
        name: &str,
        uri: &str,
        creators: Vec<Creator>,
    ) -> Vec<u8> {
        let metadata = Metadata {
            key: AccountKey::MetadataV1 as u8,
            update_authority: *update_authority,
            mint: *mint,
            data: Data {
                name: name.to_string(),
                symbol: "EXM".to_string(),
                uri: uri.to_string(),
                seller_fee_basis_points: 250,
                creators: Some(creators),
            },
            primary_sale_happened: true,
            is_mutable: false,
        };
        borsh::to_vec(&metadata).unwrap()
    }

    #[test]
    fn test_account_key_classification() {
        assert_eq!(account_key(&[4, 0, 0]), Ok(AccountKey::MetadataV1));
        assert_eq!(account_key(&[6]), Ok(AccountKey::MasterEditionV2));
        assert_eq!(account_key(&[1]), Ok(AccountKey::EditionV1));
        assert_eq!(account_key(&[42]), Err(DecodeError::UnknownKey(42)));
        assert_eq!(account_key(&[]), Err(DecodeError::Empty));
    }

    #[test]
    fn test_decode_metadata_round_trip() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let bytes = metadata_bytes(
            &mint,
            &authority,
            "Example #1\0\0\0\0",
            "https://example.com/1.json\0\0",
            vec![Creator {
                address: creator,
                verified: true,
                share: 100,
            }],
        );

        let record = decode_metadata("MetaAddr", &bytes).unwrap();
        assert_eq!(record.mint, mint.to_string());
        assert_eq!(record.metadata_address, "MetaAddr");
        assert_eq!(record.update_authority, authority.to_string());
        assert_eq!(record.name, "Example #1");
        assert_eq!(record.uri, "https://example.com/1.json");
        assert_eq!(record.seller_fee_basis_points, 250);
        assert_eq!(record.creators.len(), 1);
        assert_eq!(record.creators[0].address, creator.to_string());
        assert!(record.primary_sale_happened);
        assert!(!record.is_mutable);
    }

    #[test]
    fn test_decode_metadata_ignores_trailing_padding() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let mut bytes = metadata_bytes(&mint, &authority, "Padded", "uri", vec![]);
        bytes.extend_from_slice(&[0u8; 181]);

        let record = decode_metadata("MetaAddr", &bytes).unwrap();
        assert_eq!(record.name, "Padded");
    }

    #[test]
    fn test_decode_metadata_rejects_wrong_key() {
        let master = MasterEditionV2 {
            key: AccountKey::MasterEditionV2 as u8,
            supply: 0,
            max_supply: None,
        };
        let bytes = borsh::to_vec(&master).unwrap();
        assert_eq!(
            decode_metadata("MetaAddr", &bytes),
            Err(DecodeError::WrongKey {
                expected: AccountKey::MetadataV1,
                found: AccountKey::MasterEditionV2,
            })
        );
    }

    #[test]
    fn test_decode_print_edition() {
        let parent = Pubkey::new_unique();
        let edition = Edition {
            key: AccountKey::EditionV1 as u8,
            parent,
            edition: 42,
        };
        let bytes = borsh::to_vec(&edition).unwrap();

        let print = decode_print_edition(&bytes).unwrap();
        assert_eq!(print.parent, parent.to_string());
        assert_eq!(print.edition, 42);
    }

    #[test]
    fn test_decode_master_edition_both_versions() {
        let v2 = MasterEditionV2 {
            key: AccountKey::MasterEditionV2 as u8,
            supply: 7,
            max_supply: Some(100),
        };
        let (key, master) = decode_master_edition(&borsh::to_vec(&v2).unwrap()).unwrap();
        assert_eq!(key, AccountKey::MasterEditionV2);
        assert_eq!(master.supply, 7);
        assert_eq!(master.max_supply, Some(100));

        let v1 = MasterEditionV1 {
            key: AccountKey::MasterEditionV1 as u8,
            supply: 3,
            max_supply: None,
            printing_mint: Pubkey::new_unique(),
            one_time_printing_authorization_mint: Pubkey::new_unique(),
        };
        let (key, master) = decode_master_edition(&borsh::to_vec(&v1).unwrap()).unwrap();
        assert_eq!(key, AccountKey::MasterEditionV1);
        assert_eq!(master.supply, 3);
        assert_eq!(master.max_supply, None);
    }

    #[test]
    fn test_decode_master_edition_rejects_print() {
        let edition = Edition {
            key: AccountKey::EditionV1 as u8,
            parent: Pubkey::new_unique(),
            edition: 1,
        };
        let bytes = borsh::to_vec(&edition).unwrap();
        assert!(matches!(
            decode_master_edition(&bytes),
            Err(DecodeError::WrongKey { .. })
        ));
    }

    #[test]
    fn test_truncated_data_is_malformed() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let bytes = metadata_bytes(&mint, &authority, "Example", "uri", vec![]);
        assert!(matches!(
            decode_metadata("MetaAddr", &bytes[..40]),
            Err(DecodeError::Malformed(_))
        ));
    }
}
