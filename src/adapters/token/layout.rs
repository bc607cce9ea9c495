//! SPL Token Layout Decoding
//!
//! Decodes token-account and mint binary layouts into domain structures.
//! Both are fixed-width `Pack` layouts from the SPL token program; each
//! decode is an independent fallible step.

use solana_sdk::program_pack::Pack;
use spl_token::state::{Account, AccountState, Mint};
use thiserror::Error;

use crate::domain::holder::{TokenAccountInfo, TokenAccountState, TokenMintInfo};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenDecodeError {
    #[error("malformed token account data: {0}")]
    Account(String),

    #[error("malformed mint data: {0}")]
    Mint(String),
}

/// Decode the 165-byte SPL token-account layout.
pub fn decode_token_account(data: &[u8]) -> Result<TokenAccountInfo, TokenDecodeError> {
    let account =
        Account::unpack(data).map_err(|err| TokenDecodeError::Account(err.to_string()))?;

    Ok(TokenAccountInfo {
        mint: account.mint.to_string(),
        owner: account.owner.to_string(),
        amount: account.amount,
        state: convert_state(account.state),
        delegate: Option::from(account.delegate).map(|delegate: solana_sdk::pubkey::Pubkey| {
            delegate.to_string()
        }),
        delegated_amount: account.delegated_amount,
    })
}

/// Decode the 82-byte SPL mint layout.
pub fn decode_mint(data: &[u8]) -> Result<TokenMintInfo, TokenDecodeError> {
    let mint = Mint::unpack(data).map_err(|err| TokenDecodeError::Mint(err.to_string()))?;

    Ok(TokenMintInfo {
        supply: mint.supply,
        decimals: mint.decimals,
        is_initialized: mint.is_initialized,
        mint_authority: Option::from(mint.mint_authority)
            .map(|authority: solana_sdk::pubkey::Pubkey| authority.to_string()),
        freeze_authority: Option::from(mint.freeze_authority)
            .map(|authority: solana_sdk::pubkey::Pubkey| authority.to_string()),
    })
}

fn convert_state(state: AccountState) -> TokenAccountState {
    match state {
        AccountState::Uninitialized => TokenAccountState::Uninitialized,
        AccountState::Initialized => TokenAccountState::Initialized,
        AccountState::Frozen => TokenAccountState::Frozen,
    }
}
