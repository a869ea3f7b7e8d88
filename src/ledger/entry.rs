//! Ledger entries and their effects
//!
//! An [`Entry`] is a submitted proposal together with its confirmation
//! set and executed flag. The effect payload is generic: the wallet
//! instantiates entries with [`CallProposal`] or [`TransferProposal`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observable state of a ledger entry
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryState {
    /// Confirmation count below the required threshold
    Pending,
    /// Threshold met but the effect has not been applied yet
    Confirmed,
    /// Effect applied; terminal
    Executed,
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryState::Pending => write!(f, "pending"),
            EntryState::Confirmed => write!(f, "confirmed"),
            EntryState::Executed => write!(f, "executed"),
        }
    }
}

/// A generic call proposal: invoke a target address with value and payload
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CallProposal {
    /// Target address of the call
    pub target: String,
    /// Native value attached to the call (may be zero)
    pub value: u64,
    /// Opaque call payload
    pub payload: Vec<u8>,
}

/// A token transfer proposal: move tokens from the wallet to a destination
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransferProposal {
    /// Destination wallet address
    pub destination: String,
    /// Token amount, always greater than zero
    pub amount: u64,
}

/// A submitted proposal awaiting confirmation and execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry<E> {
    /// Ledger-local identifier, assigned at submission, never reused
    pub id: u64,
    /// The effect to apply once the confirmation threshold is met
    pub effect: E,
    /// Owners that confirmed this entry, in confirmation order
    pub confirmations: Vec<String>,
    /// Set exactly once, on successful execution
    pub executed: bool,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
}

impl<E> Entry<E> {
    /// Create a new entry, auto-confirmed by its submitter
    pub fn new(id: u64, effect: E, submitter: &str) -> Self {
        Self {
            id,
            effect,
            confirmations: vec![submitter.to_string()],
            executed: false,
            submitted_at: Utc::now(),
        }
    }

    /// Check whether an owner has already confirmed this entry
    pub fn has_confirmed(&self, owner: &str) -> bool {
        self.confirmations.iter().any(|o| o == owner)
    }

    /// Record a confirmation
    ///
    /// Returns `false` without changing anything if the owner already
    /// confirmed, so duplicates are never double-counted.
    pub fn confirm(&mut self, owner: &str) -> bool {
        if self.has_confirmed(owner) {
            return false;
        }
        self.confirmations.push(owner.to_string());
        true
    }

    /// Number of recorded confirmations, regardless of current ownership
    pub fn confirmation_count(&self) -> usize {
        self.confirmations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_auto_confirms_submitter() {
        let entry = Entry::new(
            1,
            TransferProposal {
                destination: "dest".to_string(),
                amount: 100,
            },
            "alice",
        );

        assert_eq!(entry.id, 1);
        assert!(!entry.executed);
        assert!(entry.has_confirmed("alice"));
        assert_eq!(entry.confirmation_count(), 1);
    }

    #[test]
    fn test_duplicate_confirmation_not_counted() {
        let mut entry = Entry::new(
            1,
            CallProposal {
                target: "target".to_string(),
                value: 0,
                payload: vec![],
            },
            "alice",
        );

        assert!(entry.confirm("bob"));
        assert!(!entry.confirm("bob"));
        assert!(!entry.confirm("alice"));
        assert_eq!(entry.confirmation_count(), 2);
    }

    #[test]
    fn test_confirmation_order_preserved() {
        let mut entry = Entry::new(
            1,
            CallProposal {
                target: "target".to_string(),
                value: 0,
                payload: vec![],
            },
            "alice",
        );

        entry.confirm("carol");
        entry.confirm("bob");
        assert_eq!(entry.confirmations, vec!["alice", "carol", "bob"]);
    }
}
