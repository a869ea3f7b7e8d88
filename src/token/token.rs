//! Fungible token ledger
//!
//! A minimal balance-keeping token: `balance_of`, `transfer` and a
//! mint helper `issue_tokens`. Transfers validate before mutating, so
//! a failed transfer leaves balances untouched.

use crate::crypto::sha256;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Invalid address: cannot transfer to self")]
    SelfTransfer,
    #[error("Malformed token call payload: {0}")]
    MalformedCall(String),
}

/// The token operations the wallet engine depends on
pub trait TokenContract {
    /// Address of this token contract
    fn address(&self) -> &str;

    /// Balance held by an address
    fn balance_of(&self, address: &str) -> u64;

    /// Move tokens between addresses; fails without side effect if the
    /// sender balance is insufficient
    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), TokenError>;

    /// Mint tokens to an address (test and bootstrap helper)
    fn issue_tokens(&mut self, to: &str, amount: u64);
}

/// Payload encoding for generic calls targeting a token contract
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenCall {
    /// Transfer tokens from the calling wallet to a recipient
    Transfer { to: String, amount: u64 },
}

impl TokenCall {
    /// Encode as an opaque call payload
    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("token call serializes")
    }

    /// Decode from a call payload
    pub fn decode(payload: &[u8]) -> Result<Self, TokenError> {
        serde_json::from_slice(payload).map_err(|e| TokenError::MalformedCall(e.to_string()))
    }
}

/// An in-memory fungible token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Unique token address, derived from name and symbol
    pub address: String,
    /// Token name (e.g., "Test Token")
    pub name: String,
    /// Token symbol (e.g., "TST")
    pub symbol: String,
    /// Balances: address -> amount
    balances: HashMap<String, u64>,
    /// Total amount ever issued
    total_supply: u64,
}

impl Token {
    /// Create a new token with zero supply
    pub fn new(name: &str, symbol: &str) -> Self {
        Self {
            address: Self::generate_address(name, symbol),
            name: name.to_string(),
            symbol: symbol.to_string(),
            balances: HashMap::new(),
            total_supply: 0,
        }
    }

    /// Derive the token address from its name and symbol
    fn generate_address(name: &str, symbol: &str) -> String {
        let input = format!("token:{}:{}", name, symbol);
        let hash = sha256(input.as_bytes());
        format!("0x{}", &hex::encode(hash)[..40])
    }

    /// Total amount ever issued
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Addresses with a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }
}

impl TokenContract for Token {
    fn address(&self) -> &str {
        &self.address
    }

    fn balance_of(&self, address: &str) -> u64 {
        *self.balances.get(address).unwrap_or(&0)
    }

    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), TokenError> {
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }

        if from == to {
            return Err(TokenError::SelfTransfer);
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        *self.balances.entry(from.to_string()).or_insert(0) -= amount;
        *self.balances.entry(to.to_string()).or_insert(0) += amount;

        log::debug!("Token {}: {} -> {} ({})", self.symbol, from, to, amount);

        Ok(())
    }

    fn issue_tokens(&mut self, to: &str, amount: u64) {
        *self.balances.entry(to.to_string()).or_insert(0) += amount;
        self.total_supply += amount;

        log::info!("Token {}: issued {} to {}", self.symbol, amount, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_token() -> Token {
        let mut token = Token::new("Test Token", "TST");
        token.issue_tokens("creator", 1_000_000);
        token
    }

    #[test]
    fn test_token_creation() {
        let token = create_test_token();

        assert!(token.address.starts_with("0x"));
        assert_eq!(token.total_supply(), 1_000_000);
        assert_eq!(token.balance_of("creator"), 1_000_000);
        assert_eq!(token.balance_of("nobody"), 0);
        assert_eq!(token.holder_count(), 1);
    }

    #[test]
    fn test_address_determinism() {
        let a = Token::new("Test Token", "TST");
        let b = Token::new("Test Token", "TST");
        let c = Token::new("Other Token", "OTH");

        assert_eq!(a.address, b.address);
        assert_ne!(a.address, c.address);
    }

    #[test]
    fn test_transfer() {
        let mut token = create_test_token();

        token.transfer("creator", "recipient", 1000).unwrap();
        assert_eq!(token.balance_of("creator"), 999_000);
        assert_eq!(token.balance_of("recipient"), 1000);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut token = create_test_token();

        let result = token.transfer("creator", "recipient", 2_000_000);
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
        // No partial effect
        assert_eq!(token.balance_of("creator"), 1_000_000);
        assert_eq!(token.balance_of("recipient"), 0);
    }

    #[test]
    fn test_transfer_zero_amount() {
        let mut token = create_test_token();

        let result = token.transfer("creator", "recipient", 0);
        assert!(matches!(result, Err(TokenError::InvalidAmount)));
    }

    #[test]
    fn test_self_transfer() {
        let mut token = create_test_token();

        let result = token.transfer("creator", "creator", 100);
        assert!(matches!(result, Err(TokenError::SelfTransfer)));
    }

    #[test]
    fn test_token_call_round_trip() {
        let call = TokenCall::Transfer {
            to: "recipient".to_string(),
            amount: 42,
        };

        let decoded = TokenCall::decode(&call.encode()).unwrap();
        assert_eq!(decoded, call);
    }

    #[test]
    fn test_token_call_malformed_payload() {
        assert!(matches!(
            TokenCall::decode(b"not json"),
            Err(TokenError::MalformedCall(_))
        ));
    }
}
