//! CLI Adapter
//!
//! Command-line interface for nft-scout. Uses clap derive macros for
//! argument parsing; command handlers live in `main.rs`.

mod commands;

pub use commands::{CliApp, Command, EditionCmd, FetchCmd, FetchReport, HolderCmd};
