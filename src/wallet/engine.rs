//! Execution effects and the outbound call seam
//!
//! A confirmed transaction resolves to one of two effects by target
//! identity: a self-addressed call decodes its payload as a
//! [`RegistryCall`] and mutates the wallet's own owner registry; any
//! other target is handed to the [`CallDispatcher`] collaborator. The
//! wallet imposes no restriction on foreign targets; whether a payload
//! is worth executing is for the owners to decide by confirming or not.

use crate::token::{Token, TokenCall, TokenContract, TokenError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload encoding for self-addressed registry mutations
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RegistryCall {
    /// Add a new owner
    AddOwner { owner: String },
    /// Remove a current owner
    RemoveOwner { owner: String },
    /// Change the required confirmation threshold
    ChangeRequirement { required: usize },
}

impl RegistryCall {
    /// Encode as an opaque call payload
    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("registry call serializes")
    }

    /// Decode from a call payload
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

/// Errors raised while dispatching an outbound call
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("No contract at target address: {0}")]
    UnknownTarget(String),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Outbound call collaborator
///
/// Receives every confirmed generic call whose target is not the
/// wallet itself. A failed dispatch must leave the collaborator
/// unchanged; the wallet keeps the entry pending for retry.
pub trait CallDispatcher {
    fn dispatch(
        &mut self,
        sender: &str,
        target: &str,
        value: u64,
        payload: &[u8],
    ) -> Result<(), DispatchError>;
}

impl CallDispatcher for Token {
    /// Dispatch a call addressed to this token contract
    ///
    /// The payload is decoded as a [`TokenCall`]; the attached native
    /// value is ignored since token calls move token balances only.
    fn dispatch(
        &mut self,
        sender: &str,
        target: &str,
        _value: u64,
        payload: &[u8],
    ) -> Result<(), DispatchError> {
        if target != self.address() {
            return Err(DispatchError::UnknownTarget(target.to_string()));
        }

        match TokenCall::decode(payload)? {
            TokenCall::Transfer { to, amount } => {
                self.transfer(sender, &to, amount)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_call_round_trip() {
        let calls = vec![
            RegistryCall::AddOwner {
                owner: "dave".to_string(),
            },
            RegistryCall::RemoveOwner {
                owner: "carol".to_string(),
            },
            RegistryCall::ChangeRequirement { required: 1 },
        ];

        for call in calls {
            assert_eq!(RegistryCall::decode(&call.encode()).unwrap(), call);
        }
    }

    #[test]
    fn test_registry_call_rejects_garbage() {
        assert!(RegistryCall::decode(b"213123").is_err());
        assert!(RegistryCall::decode(b"").is_err());
    }

    #[test]
    fn test_token_dispatch_transfer() {
        let mut token = Token::new("Test Token", "TST");
        token.issue_tokens("wallet", 1000);
        let target = token.address().to_string();

        let payload = TokenCall::Transfer {
            to: "recipient".to_string(),
            amount: 400,
        }
        .encode();

        token.dispatch("wallet", &target, 0, &payload).unwrap();
        assert_eq!(token.balance_of("wallet"), 600);
        assert_eq!(token.balance_of("recipient"), 400);
    }

    #[test]
    fn test_token_dispatch_unknown_target() {
        let mut token = Token::new("Test Token", "TST");
        let payload = TokenCall::Transfer {
            to: "recipient".to_string(),
            amount: 1,
        }
        .encode();

        let result = token.dispatch("wallet", "0xsomewhere_else", 0, &payload);
        assert!(matches!(result, Err(DispatchError::UnknownTarget(_))));
    }

    #[test]
    fn test_token_dispatch_failure_is_side_effect_free() {
        let mut token = Token::new("Test Token", "TST");
        token.issue_tokens("wallet", 100);
        let target = token.address().to_string();

        let payload = TokenCall::Transfer {
            to: "recipient".to_string(),
            amount: 500,
        }
        .encode();

        assert!(token.dispatch("wallet", &target, 0, &payload).is_err());
        assert_eq!(token.balance_of("wallet"), 100);
        assert_eq!(token.balance_of("recipient"), 0);
    }
}
