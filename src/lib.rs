//! Multisig Wallet: a threshold-confirmation authorization engine
//!
//! This crate implements a multi-signature wallet core:
//! - Owner registry with a required confirmation threshold
//! - Append-only proposal ledgers for generic calls and token transfers
//! - Eager, exactly-once execution once the threshold is met
//! - Registry changes routed through the same consensus pipeline via
//!   self-addressed proposals
//! - Token transfer routing between wallets sharing one token contract
//! - JSON persistence of the full wallet state
//!
//! # Example
//!
//! ```rust
//! use multisig_wallet::token::Token;
//! use multisig_wallet::wallet::WalletManager;
//!
//! let mut manager = WalletManager::new(Token::new("Test Token", "TST"));
//!
//! // Create a 2-of-3 wallet and fund it
//! let owners = vec!["alice".into(), "bob".into(), "carol".into()];
//! let address = manager.create_wallet(owners, 2).unwrap().address().to_string();
//! manager.issue_tokens(&address, 1000);
//!
//! // alice proposes a transfer; bob's confirmation executes it
//! let id = manager.submit_transfer(&address, "recipient", 100, "alice").unwrap();
//! manager.confirm_transfer(&address, id, "bob").unwrap();
//! assert_eq!(manager.balance_of("recipient"), 100);
//! ```

pub mod cli;
pub mod crypto;
pub mod ledger;
pub mod storage;
pub mod token;
pub mod wallet;

// Re-export commonly used types
pub use ledger::{CallProposal, Entry, EntryState, ProposalLedger, TransferProposal};
pub use storage::{Storage, StorageConfig};
pub use token::{Token, TokenCall, TokenContract};
pub use wallet::{
    CallDispatcher, OwnerRegistry, RegistryCall, Wallet, WalletError, WalletManager,
};
