//! Token contract collaborator
//!
//! The wallet never holds token balances itself; it is bound to one
//! token contract at construction and moves balances through it. The
//! [`TokenContract`] trait is the seam the execution engine depends on;
//! [`Token`] is the in-memory implementation used by the CLI and tests.

pub mod token;

pub use token::{Token, TokenCall, TokenContract, TokenError};
