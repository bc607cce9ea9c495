//! Edition Lineage
//!
//! Classification of a token's edition account: the canonical master edition
//! (v1 or v2), a numbered print derived from a master, or unknown when the
//! edition account is missing or unreadable.

use serde::{Deserialize, Serialize};

/// Master edition payload common to v1 and v2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterEditionData {
    /// Number of prints issued so far
    pub supply: u64,
    /// Print cap; `None` means unlimited
    pub max_supply: Option<u64>,
}

/// Numbered print payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintEditionData {
    /// Address of the parent master edition account
    pub parent: String,
    /// This print's number in the run
    pub edition: u64,
}

/// Edition classification with per-state payloads.
///
/// For prints, the parent master address is the `parent` field of the print
/// data; `master` carries the parent's decoded data when the second-level
/// fetch succeeded and is absent when it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditionInfo {
    MasterV1 {
        edition_address: String,
        master: MasterEditionData,
    },
    MasterV2 {
        edition_address: String,
        master: MasterEditionData,
    },
    PrintV1 {
        edition_address: String,
        print: PrintEditionData,
        master: Option<MasterEditionData>,
    },
    Unknown,
}

impl EditionInfo {
    /// True for either master edition version
    pub fn is_master(&self) -> bool {
        matches!(self, EditionInfo::MasterV1 { .. } | EditionInfo::MasterV2 { .. })
    }

    pub fn is_print(&self) -> bool {
        matches!(self, EditionInfo::PrintV1 { .. })
    }

    /// Parent master edition address, prints only
    pub fn master_edition_address(&self) -> Option<&str> {
        match self {
            EditionInfo::PrintV1 { print, .. } => Some(&print.parent),
            _ => None,
        }
    }
}

impl Default for EditionInfo {
    fn default() -> Self {
        EditionInfo::Unknown
    }
}
