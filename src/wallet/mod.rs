//! Multi-signature wallet engine
//!
//! Provides threshold-confirmation wallets: any current owner may
//! propose an action, and the action executes once `required` distinct
//! current owners have confirmed it. Ownership and threshold changes
//! flow through the same pipeline as every other action, as the effect
//! of a transaction addressed to the wallet itself.
//!
//! # Example
//!
//! ```ignore
//! use multisig_wallet::token::Token;
//! use multisig_wallet::wallet::{RegistryCall, Wallet};
//!
//! // 2-of-3 wallet bound to a token contract
//! let mut token = Token::new("Test Token", "TST");
//! let mut wallet = Wallet::new(token.address(), owners, 2)?;
//!
//! // Propose adding an owner; the submitter auto-confirms
//! let payload = RegistryCall::AddOwner { owner: new_owner }.encode();
//! let id = wallet.submit_transaction(&wallet.address.clone(), 0, payload, &alice, &mut token)?;
//!
//! // The second confirmation meets the threshold and executes
//! wallet.confirm_transaction(id, &bob, &mut token)?;
//! ```

pub mod engine;
pub mod manager;
pub mod registry;
pub mod wallet;

pub use engine::{CallDispatcher, DispatchError, RegistryCall};
pub use manager::WalletManager;
pub use registry::{OwnerRegistry, WalletError};
pub use wallet::Wallet;
