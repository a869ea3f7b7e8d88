//! Wallet manager
//!
//! Owns the token contract and the multisig wallets bound to it, and
//! routes operations so callers do not have to thread the token
//! collaborator through every call. This is the aggregate the CLI
//! persists between invocations.

use crate::ledger::EntryState;
use crate::token::{Token, TokenContract};
use crate::wallet::registry::WalletError;
use crate::wallet::wallet::Wallet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Manager for multisig wallets sharing one token contract
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletManager {
    /// The token contract every managed wallet is bound to
    token: Token,
    /// Wallets by address
    wallets: HashMap<String, Wallet>,
}

impl WalletManager {
    /// Create a manager around a token contract
    pub fn new(token: Token) -> Self {
        Self {
            token,
            wallets: HashMap::new(),
        }
    }

    /// The managed token contract
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Mint tokens to an address (test and bootstrap helper)
    pub fn issue_tokens(&mut self, to: &str, amount: u64) {
        self.token.issue_tokens(to, amount);
    }

    /// Token balance of any address
    pub fn balance_of(&self, address: &str) -> u64 {
        self.token.balance_of(address)
    }

    /// Create a new wallet bound to the managed token
    ///
    /// The same configuration always derives the same address; creating
    /// a wallet that already exists returns the existing one untouched.
    pub fn create_wallet(
        &mut self,
        owners: Vec<String>,
        required: usize,
    ) -> Result<&Wallet, WalletError> {
        let wallet = Wallet::new(self.token.address(), owners, required)?;
        let address = wallet.address().to_string();

        Ok(self.wallets.entry(address).or_insert(wallet))
    }

    /// Get a wallet by address
    pub fn get_wallet(&self, address: &str) -> Option<&Wallet> {
        self.wallets.get(address)
    }

    /// List all wallets
    pub fn list_wallets(&self) -> Vec<&Wallet> {
        self.wallets.values().collect()
    }

    /// Number of managed wallets
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    /// Check if an address belongs to a managed wallet
    pub fn is_wallet_address(&self, address: &str) -> bool {
        self.wallets.contains_key(address)
    }

    /// Submit a generic call proposal on a managed wallet
    pub fn submit_transaction(
        &mut self,
        wallet_address: &str,
        target: &str,
        value: u64,
        payload: Vec<u8>,
        from: &str,
    ) -> Result<u64, WalletError> {
        let wallet = self
            .wallets
            .get_mut(wallet_address)
            .ok_or_else(|| WalletError::WalletNotFound(wallet_address.to_string()))?;
        wallet.submit_transaction(target, value, payload, from, &mut self.token)
    }

    /// Confirm a transaction on a managed wallet
    pub fn confirm_transaction(
        &mut self,
        wallet_address: &str,
        id: u64,
        from: &str,
    ) -> Result<EntryState, WalletError> {
        let wallet = self
            .wallets
            .get_mut(wallet_address)
            .ok_or_else(|| WalletError::WalletNotFound(wallet_address.to_string()))?;
        wallet.confirm_transaction(id, from, &mut self.token)
    }

    /// Explicitly attempt execution of a transaction
    pub fn execute_transaction(
        &mut self,
        wallet_address: &str,
        id: u64,
        from: &str,
    ) -> Result<EntryState, WalletError> {
        let wallet = self
            .wallets
            .get_mut(wallet_address)
            .ok_or_else(|| WalletError::WalletNotFound(wallet_address.to_string()))?;
        wallet.execute_transaction(id, from, &mut self.token)
    }

    /// Submit a token transfer proposal on a managed wallet
    pub fn submit_transfer(
        &mut self,
        wallet_address: &str,
        destination: &str,
        amount: u64,
        from: &str,
    ) -> Result<u64, WalletError> {
        let wallet = self
            .wallets
            .get_mut(wallet_address)
            .ok_or_else(|| WalletError::WalletNotFound(wallet_address.to_string()))?;
        wallet.submit_transfer(destination, amount, from, &mut self.token)
    }

    /// Confirm a transfer on a managed wallet
    pub fn confirm_transfer(
        &mut self,
        wallet_address: &str,
        id: u64,
        from: &str,
    ) -> Result<EntryState, WalletError> {
        let wallet = self
            .wallets
            .get_mut(wallet_address)
            .ok_or_else(|| WalletError::WalletNotFound(wallet_address.to_string()))?;
        wallet.confirm_transfer(id, from, &mut self.token)
    }

    /// Explicitly attempt execution of a transfer
    pub fn execute_transfer(
        &mut self,
        wallet_address: &str,
        id: u64,
        from: &str,
    ) -> Result<EntryState, WalletError> {
        let wallet = self
            .wallets
            .get_mut(wallet_address)
            .ok_or_else(|| WalletError::WalletNotFound(wallet_address.to_string()))?;
        wallet.execute_transfer(id, from, &mut self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owners() -> Vec<String> {
        vec!["alice".to_string(), "bob".to_string(), "carol".to_string()]
    }

    fn create_test_manager() -> WalletManager {
        WalletManager::new(Token::new("Test Token", "TST"))
    }

    #[test]
    fn test_manager_creation() {
        let manager = create_test_manager();
        assert_eq!(manager.wallet_count(), 0);
    }

    #[test]
    fn test_wallet_creation() {
        let mut manager = create_test_manager();

        let address = manager
            .create_wallet(owners(), 2)
            .unwrap()
            .address()
            .to_string();
        assert!(address.starts_with('3'));
        assert_eq!(manager.wallet_count(), 1);
        assert!(manager.is_wallet_address(&address));

        // Same config resolves to the same wallet
        let address2 = manager
            .create_wallet(owners(), 2)
            .unwrap()
            .address()
            .to_string();
        assert_eq!(address, address2);
        assert_eq!(manager.wallet_count(), 1);
    }

    #[test]
    fn test_operations_require_known_wallet() {
        let mut manager = create_test_manager();

        assert!(matches!(
            manager.submit_transfer("3unknown", "dest", 10, "alice"),
            Err(WalletError::WalletNotFound(_))
        ));
        assert!(matches!(
            manager.confirm_transaction("3unknown", 1, "alice"),
            Err(WalletError::WalletNotFound(_))
        ));
    }

    #[test]
    fn test_wallet_to_wallet_transfer() {
        // wallet1 {alice, bob, carol} required 2 holds 1000 tokens;
        // alice proposes 100 to wallet2, bob confirms, tokens move.
        let mut manager = create_test_manager();

        let wallet1 = manager
            .create_wallet(owners(), 2)
            .unwrap()
            .address()
            .to_string();
        let wallet2 = manager
            .create_wallet(vec!["dora".to_string(), "eve".to_string()], 2)
            .unwrap()
            .address()
            .to_string();

        manager.issue_tokens(&wallet1, 1000);
        assert_eq!(manager.balance_of(&wallet1), 1000);

        let id = manager
            .submit_transfer(&wallet1, &wallet2, 100, "alice")
            .unwrap();
        assert_eq!(manager.balance_of(&wallet2), 0);

        let state = manager.confirm_transfer(&wallet1, id, "bob").unwrap();
        assert_eq!(state, EntryState::Executed);
        assert_eq!(manager.balance_of(&wallet1), 900);
        assert_eq!(manager.balance_of(&wallet2), 100);
    }

    #[test]
    fn test_registry_mutation_through_manager() {
        use crate::wallet::engine::RegistryCall;

        let mut manager = create_test_manager();
        let wallet = manager
            .create_wallet(owners(), 2)
            .unwrap()
            .address()
            .to_string();

        let payload = RegistryCall::AddOwner {
            owner: "dave".to_string(),
        }
        .encode();
        let id = manager
            .submit_transaction(&wallet, &wallet, 0, payload, "alice")
            .unwrap();
        manager.confirm_transaction(&wallet, id, "bob").unwrap();

        assert!(manager.get_wallet(&wallet).unwrap().is_owner("dave"));
    }
}
