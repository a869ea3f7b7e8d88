//! Append-only proposal ledgers
//!
//! A wallet keeps two structurally identical ledgers: one for generic
//! call proposals and one for token transfer proposals. Both are
//! instances of [`ProposalLedger`], parameterized by the effect type,
//! with independent id sequences.
//!
//! Entries are created by submission, mutated only by confirmation and
//! execution, and never deleted. The ledger itself knows nothing about
//! ownership or thresholds; that policy lives in the wallet layer.

pub mod entry;
pub mod ledger;

pub use entry::{CallProposal, Entry, EntryState, TransferProposal};
pub use ledger::ProposalLedger;
