//! Domain Layer - Core types and logic for NFT enrichment
//!
//! Pure domain types and the keyed merge, with no I/O. All external
//! interactions happen through the ports layer.

pub mod edition;
pub mod enriched;
pub mod holder;
pub mod merge;
pub mod metadata;
pub mod progress;
pub mod selector;

pub use edition::{EditionInfo, MasterEditionData, PrintEditionData};
pub use enriched::{EnrichedNft, Enrichment};
pub use holder::{HolderInfo, TokenAccountInfo, TokenAccountState, TokenMintInfo};
pub use merge::{merge_enrichments, MergeError};
pub use metadata::{Creator, MetadataRecord};
pub use progress::{LogProgress, NoopProgress, ProgressEvent, ProgressSink, ProgressStatus};
pub use selector::{NftSelector, Selection, SelectorError};
