//! Owner registry
//!
//! Holds the set of addresses authorized to propose, confirm and
//! execute, together with the required confirmation threshold. The
//! registry enforces `1 <= required <= owner count` through every
//! mutation; an operation that would break the invariant is rejected
//! before anything changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Unauthorized: {0} is not a current owner")]
    Unauthorized(String),
    #[error("Entry not found: {0}")]
    NotFound(u64),
    #[error("Entry {id} already confirmed by {owner}")]
    AlreadyConfirmed { id: u64, owner: String },
    #[error("Entry {id} not confirmed by {owner}")]
    NotConfirmed { id: u64, owner: String },
    #[error("Invalid requirement: {required} confirmations with {owners} owner(s)")]
    InvalidRequirement { required: usize, owners: usize },
    #[error("Duplicate owner: {0}")]
    DuplicateOwner(String),
    #[error("Unknown owner: {0}")]
    UnknownOwner(String),
    #[error("Invalid amount: transfers must move at least one token")]
    InvalidAmount,
    #[error("Token mismatch: wallet is bound to {expected}, got {got}")]
    TokenMismatch { expected: String, got: String },
    #[error("Execution of entry {id} failed: {reason}")]
    ExecutionFailed { id: u64, reason: String },
    #[error("Deposit rejected: wallet does not accept unsolicited value")]
    DepositRejected,
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),
}

/// The set of owners and the confirmation threshold
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OwnerRegistry {
    /// Owner addresses in insertion order
    owners: Vec<String>,
    /// Distinct current-owner confirmations needed to execute
    required: usize,
}

impl OwnerRegistry {
    /// Create a registry, validating owners and threshold
    pub fn new(owners: Vec<String>, required: usize) -> Result<Self, WalletError> {
        for (i, owner) in owners.iter().enumerate() {
            if owners[..i].contains(owner) {
                return Err(WalletError::DuplicateOwner(owner.clone()));
            }
        }

        if required == 0 || required > owners.len() {
            return Err(WalletError::InvalidRequirement {
                required,
                owners: owners.len(),
            });
        }

        Ok(Self { owners, required })
    }

    /// Check whether an address is a current owner
    pub fn is_owner(&self, address: &str) -> bool {
        self.owners.iter().any(|o| o == address)
    }

    /// Owner addresses in insertion order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Number of current owners
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Required confirmation threshold
    pub fn required(&self) -> usize {
        self.required
    }

    /// Description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required, self.owners.len())
    }

    /// Add a new owner
    pub fn add_owner(&mut self, address: &str) -> Result<(), WalletError> {
        if self.is_owner(address) {
            return Err(WalletError::DuplicateOwner(address.to_string()));
        }
        self.owners.push(address.to_string());

        log::info!("Owner added: {} (now {})", address, self.description());
        Ok(())
    }

    /// Remove an owner
    ///
    /// Rejected if the address is not an owner or if removal would drop
    /// the owner count below the required threshold.
    pub fn remove_owner(&mut self, address: &str) -> Result<(), WalletError> {
        if !self.is_owner(address) {
            return Err(WalletError::UnknownOwner(address.to_string()));
        }
        if self.owners.len() - 1 < self.required {
            return Err(WalletError::InvalidRequirement {
                required: self.required,
                owners: self.owners.len() - 1,
            });
        }
        self.owners.retain(|o| o != address);

        log::info!("Owner removed: {} (now {})", address, self.description());
        Ok(())
    }

    /// Change the required confirmation threshold
    pub fn change_requirement(&mut self, required: usize) -> Result<(), WalletError> {
        if required == 0 || required > self.owners.len() || self.owners.is_empty() {
            return Err(WalletError::InvalidRequirement {
                required,
                owners: self.owners.len(),
            });
        }
        self.required = required;

        log::info!("Requirement changed: now {}", self.description());
        Ok(())
    }

    /// Count the confirmations in a set that belong to current owners
    ///
    /// Confirmations are always evaluated against current membership, so
    /// a removed owner loses standing on pending entries.
    pub fn live_confirmations(&self, confirmations: &[String]) -> usize {
        confirmations.iter().filter(|o| self.is_owner(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owners() -> Vec<String> {
        vec!["alice".to_string(), "bob".to_string(), "carol".to_string()]
    }

    #[test]
    fn test_registry_creation() {
        let registry = OwnerRegistry::new(owners(), 2).unwrap();

        assert_eq!(registry.owner_count(), 3);
        assert_eq!(registry.required(), 2);
        assert_eq!(registry.description(), "2-of-3");
        assert!(registry.is_owner("alice"));
        assert!(!registry.is_owner("mallory"));
    }

    #[test]
    fn test_registry_validation() {
        // Zero threshold
        assert!(matches!(
            OwnerRegistry::new(owners(), 0),
            Err(WalletError::InvalidRequirement { .. })
        ));

        // Threshold above owner count
        assert!(matches!(
            OwnerRegistry::new(owners(), 4),
            Err(WalletError::InvalidRequirement { .. })
        ));

        // No owners at all
        assert!(matches!(
            OwnerRegistry::new(vec![], 1),
            Err(WalletError::InvalidRequirement { .. })
        ));

        // Duplicate owners
        let dup = vec!["alice".to_string(), "alice".to_string()];
        assert!(matches!(
            OwnerRegistry::new(dup, 1),
            Err(WalletError::DuplicateOwner(_))
        ));
    }

    #[test]
    fn test_add_owner() {
        let mut registry = OwnerRegistry::new(owners(), 2).unwrap();

        registry.add_owner("dave").unwrap();
        assert!(registry.is_owner("dave"));
        assert_eq!(registry.owner_count(), 4);

        assert!(matches!(
            registry.add_owner("dave"),
            Err(WalletError::DuplicateOwner(_))
        ));
    }

    #[test]
    fn test_remove_owner_keeps_threshold_invariant() {
        let mut registry = OwnerRegistry::new(owners(), 2).unwrap();

        registry.remove_owner("carol").unwrap();
        assert_eq!(registry.owner_count(), 2);

        // Removing another owner would leave 1 < required 2
        assert!(matches!(
            registry.remove_owner("bob"),
            Err(WalletError::InvalidRequirement { .. })
        ));
        assert!(registry.is_owner("bob"));

        assert!(matches!(
            registry.remove_owner("mallory"),
            Err(WalletError::UnknownOwner(_))
        ));
    }

    #[test]
    fn test_change_requirement() {
        let mut registry = OwnerRegistry::new(owners(), 2).unwrap();

        registry.change_requirement(3).unwrap();
        assert_eq!(registry.required(), 3);

        assert!(matches!(
            registry.change_requirement(0),
            Err(WalletError::InvalidRequirement { .. })
        ));
        assert!(matches!(
            registry.change_requirement(4),
            Err(WalletError::InvalidRequirement { .. })
        ));
        // Failed mutations leave the threshold unchanged
        assert_eq!(registry.required(), 3);
    }

    #[test]
    fn test_live_confirmations_track_current_membership() {
        let mut registry = OwnerRegistry::new(owners(), 2).unwrap();
        let confirmations = vec!["alice".to_string(), "carol".to_string()];

        assert_eq!(registry.live_confirmations(&confirmations), 2);

        registry.remove_owner("carol").unwrap();
        assert_eq!(registry.live_confirmations(&confirmations), 1);
    }
}
