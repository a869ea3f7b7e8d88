//! CLI command handlers for the multisig tool

pub mod commands;

pub use commands::*;
