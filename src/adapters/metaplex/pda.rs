//! Derived Addresses
//!
//! Metadata and edition accounts live at program-derived addresses seeded
//! from the mint, so they can be located without a separate index:
//! `["metadata", program, mint]` for the record itself and
//! `["metadata", program, mint, "edition"]` for the edition account.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

const METADATA_SEED: &[u8] = b"metadata";
const EDITION_SEED: &[u8] = b"edition";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdaError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Metadata PDA for a mint.
pub fn metadata_address_for(mint: &Pubkey) -> Pubkey {
    let program = super::id();
    Pubkey::find_program_address(&[METADATA_SEED, program.as_ref(), mint.as_ref()], &program).0
}

/// Edition PDA for a mint.
pub fn edition_address_for(mint: &Pubkey) -> Pubkey {
    let program = super::id();
    Pubkey::find_program_address(
        &[METADATA_SEED, program.as_ref(), mint.as_ref(), EDITION_SEED],
        &program,
    )
    .0
}

/// Base58 variant of [`metadata_address_for`] for domain-layer callers.
pub fn find_metadata_address(mint: &str) -> Result<String, PdaError> {
    let mint = parse(mint)?;
    Ok(metadata_address_for(&mint).to_string())
}

/// Base58 variant of [`edition_address_for`] for domain-layer callers.
pub fn find_edition_address(mint: &str) -> Result<String, PdaError> {
    let mint = parse(mint)?;
    Ok(edition_address_for(&mint).to_string())
}

fn parse(address: &str) -> Result<Pubkey, PdaError> {
    Pubkey::from_str(address).map_err(|_| PdaError::InvalidPublicKey(address.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let mint = Pubkey::new_unique();
        assert_eq!(metadata_address_for(&mint), metadata_address_for(&mint));
        assert_eq!(edition_address_for(&mint), edition_address_for(&mint));
    }

    #[test]
    fn test_metadata_and_edition_addresses_differ() {
        let mint = Pubkey::new_unique();
        assert_ne!(metadata_address_for(&mint), edition_address_for(&mint));
    }

    #[test]
    fn test_different_mints_derive_different_addresses() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_ne!(metadata_address_for(&a), metadata_address_for(&b));
    }

    #[test]
    fn test_string_variants_match_pubkey_variants() {
        let mint = Pubkey::new_unique();
        assert_eq!(
            find_metadata_address(&mint.to_string()).unwrap(),
            metadata_address_for(&mint).to_string()
        );
        assert_eq!(
            find_edition_address(&mint.to_string()).unwrap(),
            edition_address_for(&mint).to_string()
        );
    }

    #[test]
    fn test_invalid_mint_string() {
        assert_eq!(
            find_edition_address("not-base58!"),
            Err(PdaError::InvalidPublicKey("not-base58!".to_string()))
        );
    }
}
