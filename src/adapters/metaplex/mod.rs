//! Metaplex Token Metadata Adapter
//!
//! Pure decoders for the Token Metadata program's account layouts plus the
//! PDA derivations used to locate them.

pub mod accounts;
pub mod pda;

solana_sdk::declare_id!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub use accounts::{
    account_key, decode_master_edition, decode_metadata, decode_print_edition, AccountKey,
    DecodeError,
};
pub use pda::{
    edition_address_for, find_edition_address, find_metadata_address, metadata_address_for,
    PdaError,
};
