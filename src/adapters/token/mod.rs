//! SPL Token Adapter
//!
//! Binary layout decoding for token accounts and mints.

pub mod layout;

pub use layout::{decode_mint, decode_token_account, TokenDecodeError};
