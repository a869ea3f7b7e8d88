//! Multi-signature wallet core
//!
//! A [`Wallet`] pairs an owner registry with two independent
//! append-only ledgers: generic call proposals and token transfer
//! proposals. Every mutating operation is serialized and atomic;
//! execution is attempted eagerly after each submission and
//! confirmation, so an entry whose threshold is met executes without a
//! separate trigger.
//!
//! Registry mutation is not a direct API: it is the effect of
//! executing a transaction whose target is the wallet's own address,
//! so changing ownership or the threshold takes the same multi-owner
//! consensus as any other action.

use crate::crypto::{double_sha256, sha256};
use crate::ledger::{CallProposal, Entry, EntryState, ProposalLedger, TransferProposal};
use crate::token::TokenContract;
use crate::wallet::engine::{CallDispatcher, RegistryCall};
use crate::wallet::registry::{OwnerRegistry, WalletError};
use chrono::{DateTime, Utc};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::Digest;

/// A threshold-confirmation multisig wallet bound to one token contract
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique wallet address (P2SH-style, starts with '3')
    pub address: String,
    /// Owners and the confirmation threshold
    registry: OwnerRegistry,
    /// Generic call proposals, own id sequence
    transactions: ProposalLedger<CallProposal>,
    /// Token transfer proposals, own id sequence
    transfers: ProposalLedger<TransferProposal>,
    /// Token contract bound at construction, immutable afterwards
    token_address: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet
    ///
    /// Fails if `required` is zero or above the owner count, or if the
    /// owner list contains duplicates. The token binding never changes
    /// after construction.
    pub fn new(
        token_address: &str,
        owners: Vec<String>,
        required: usize,
    ) -> Result<Self, WalletError> {
        let registry = OwnerRegistry::new(owners, required)?;
        let address = Self::generate_address(&registry, token_address);

        log::info!("Wallet created: {} ({})", address, registry.description());

        Ok(Self {
            address,
            registry,
            transactions: ProposalLedger::new(),
            transfers: ProposalLedger::new(),
            token_address: token_address.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Generate a P2SH-style address from the initial configuration
    ///
    /// Address = Base58Check(version || RIPEMD160(SHA256(required || sorted_owners || token)))
    fn generate_address(registry: &OwnerRegistry, token_address: &str) -> String {
        let mut sorted_owners = registry.owners().to_vec();
        sorted_owners.sort();

        let mut script_data = (registry.required() as u64).to_be_bytes().to_vec();
        for owner in &sorted_owners {
            script_data.extend_from_slice(owner.as_bytes());
        }
        script_data.extend_from_slice(token_address.as_bytes());

        let sha256_hash = sha256(&script_data);

        let mut ripemd = Ripemd160::new();
        ripemd.update(&sha256_hash);
        let ripemd_hash = ripemd.finalize();

        // P2SH version byte produces addresses starting with '3'
        let mut address_bytes = vec![0x05];
        address_bytes.extend_from_slice(&ripemd_hash);

        let checksum = double_sha256(&address_bytes);
        address_bytes.extend_from_slice(&checksum[..4]);

        bs58::encode(address_bytes).into_string()
    }

    /// Wallet address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Address of the token contract set at creation
    pub fn token_contract(&self) -> &str {
        &self.token_address
    }

    /// The current owner registry
    pub fn registry(&self) -> &OwnerRegistry {
        &self.registry
    }

    /// Required confirmation threshold
    pub fn required(&self) -> usize {
        self.registry.required()
    }

    /// Check whether an address is a current owner
    pub fn is_owner(&self, address: &str) -> bool {
        self.registry.is_owner(address)
    }

    /// Reject an unsolicited native value deposit
    ///
    /// The wallet only accepts value as the side effect of an executed
    /// proposal; its primary receive path always fails.
    pub fn receive(&self, _amount: u64) -> Result<(), WalletError> {
        Err(WalletError::DepositRejected)
    }

    // =========================================================================
    // Transaction ledger
    // =========================================================================

    /// Submit a generic call proposal
    ///
    /// The submitter must be a current owner and is auto-confirmed.
    /// Execution is attempted immediately, so with `required == 1` the
    /// effect runs before this returns; an effect failure surfaces as
    /// [`WalletError::ExecutionFailed`] carrying the assigned id, with
    /// the entry and its confirmation already committed.
    pub fn submit_transaction(
        &mut self,
        target: &str,
        value: u64,
        payload: Vec<u8>,
        from: &str,
        dispatcher: &mut dyn CallDispatcher,
    ) -> Result<u64, WalletError> {
        if !self.registry.is_owner(from) {
            return Err(WalletError::Unauthorized(from.to_string()));
        }

        let effect = CallProposal {
            target: target.to_string(),
            value,
            payload,
        };
        let id = self.transactions.submit(effect, from);

        log::info!(
            "Wallet {}: transaction {} submitted by {} (target {})",
            self.address,
            id,
            from,
            target
        );

        self.try_execute_transaction(id, dispatcher)?;
        Ok(id)
    }

    /// Confirm a pending transaction and eagerly attempt execution
    ///
    /// Confirming an already-executed entry is a no-op returning
    /// `Executed`.
    pub fn confirm_transaction(
        &mut self,
        id: u64,
        from: &str,
        dispatcher: &mut dyn CallDispatcher,
    ) -> Result<EntryState, WalletError> {
        if !self.registry.is_owner(from) {
            return Err(WalletError::Unauthorized(from.to_string()));
        }

        let entry = self
            .transactions
            .get_mut(id)
            .ok_or(WalletError::NotFound(id))?;
        if entry.executed {
            return Ok(EntryState::Executed);
        }
        if !entry.confirm(from) {
            return Err(WalletError::AlreadyConfirmed {
                id,
                owner: from.to_string(),
            });
        }

        log::info!(
            "Wallet {}: transaction {} confirmed by {}",
            self.address,
            id,
            from
        );

        self.try_execute_transaction(id, dispatcher)
    }

    /// Explicitly attempt execution of a transaction
    ///
    /// The caller must be a current owner that has itself confirmed
    /// the entry. An under-confirmed entry is left untouched and its
    /// current state returned; an executed entry is a no-op.
    pub fn execute_transaction(
        &mut self,
        id: u64,
        from: &str,
        dispatcher: &mut dyn CallDispatcher,
    ) -> Result<EntryState, WalletError> {
        if !self.registry.is_owner(from) {
            return Err(WalletError::Unauthorized(from.to_string()));
        }

        let entry = self.transactions.get(id).ok_or(WalletError::NotFound(id))?;
        if entry.executed {
            return Ok(EntryState::Executed);
        }
        if !entry.has_confirmed(from) {
            return Err(WalletError::NotConfirmed {
                id,
                owner: from.to_string(),
            });
        }

        self.try_execute_transaction(id, dispatcher)
    }

    /// Look up a transaction entry
    pub fn transaction(&self, id: u64) -> Option<&Entry<CallProposal>> {
        self.transactions.get(id)
    }

    /// Transaction ids filtered by `(include_pending, include_executed)`
    /// and windowed by `[from, to)` over the filtered subset
    pub fn transaction_ids(
        &self,
        from: usize,
        to: usize,
        include_pending: bool,
        include_executed: bool,
    ) -> Vec<u64> {
        self.transactions
            .ids(from, to, include_pending, include_executed)
    }

    /// Count of transactions matching the filter pair
    pub fn transaction_count(&self, include_pending: bool, include_executed: bool) -> usize {
        self.transactions.count(include_pending, include_executed)
    }

    /// Whether a transaction currently meets the confirmation threshold
    pub fn is_transaction_confirmed(&self, id: u64) -> Result<bool, WalletError> {
        let entry = self.transactions.get(id).ok_or(WalletError::NotFound(id))?;
        Ok(self.meets_threshold(&entry.confirmations))
    }

    /// Observable state of a transaction
    pub fn transaction_state(&self, id: u64) -> Result<EntryState, WalletError> {
        let entry = self.transactions.get(id).ok_or(WalletError::NotFound(id))?;
        Ok(self.entry_state(entry.executed, &entry.confirmations))
    }

    // =========================================================================
    // Transfer ledger
    // =========================================================================

    /// Submit a token transfer proposal
    ///
    /// Mirrors [`Wallet::submit_transaction`] with two extra checks:
    /// the amount must be positive and the supplied token must be the
    /// one this wallet was bound to at creation.
    pub fn submit_transfer(
        &mut self,
        destination: &str,
        amount: u64,
        from: &str,
        token: &mut dyn TokenContract,
    ) -> Result<u64, WalletError> {
        if !self.registry.is_owner(from) {
            return Err(WalletError::Unauthorized(from.to_string()));
        }
        if amount == 0 {
            return Err(WalletError::InvalidAmount);
        }
        self.check_token(token)?;

        let effect = TransferProposal {
            destination: destination.to_string(),
            amount,
        };
        let id = self.transfers.submit(effect, from);

        log::info!(
            "Wallet {}: transfer {} submitted by {} ({} -> {})",
            self.address,
            id,
            from,
            amount,
            destination
        );

        self.try_execute_transfer(id, token)?;
        Ok(id)
    }

    /// Confirm a pending transfer and eagerly attempt execution
    pub fn confirm_transfer(
        &mut self,
        id: u64,
        from: &str,
        token: &mut dyn TokenContract,
    ) -> Result<EntryState, WalletError> {
        if !self.registry.is_owner(from) {
            return Err(WalletError::Unauthorized(from.to_string()));
        }
        self.check_token(token)?;

        let entry = self.transfers.get_mut(id).ok_or(WalletError::NotFound(id))?;
        if entry.executed {
            return Ok(EntryState::Executed);
        }
        if !entry.confirm(from) {
            return Err(WalletError::AlreadyConfirmed {
                id,
                owner: from.to_string(),
            });
        }

        log::info!(
            "Wallet {}: transfer {} confirmed by {}",
            self.address,
            id,
            from
        );

        self.try_execute_transfer(id, token)
    }

    /// Explicitly attempt execution of a transfer
    pub fn execute_transfer(
        &mut self,
        id: u64,
        from: &str,
        token: &mut dyn TokenContract,
    ) -> Result<EntryState, WalletError> {
        if !self.registry.is_owner(from) {
            return Err(WalletError::Unauthorized(from.to_string()));
        }
        self.check_token(token)?;

        let entry = self.transfers.get(id).ok_or(WalletError::NotFound(id))?;
        if entry.executed {
            return Ok(EntryState::Executed);
        }
        if !entry.has_confirmed(from) {
            return Err(WalletError::NotConfirmed {
                id,
                owner: from.to_string(),
            });
        }

        self.try_execute_transfer(id, token)
    }

    /// Look up a transfer entry
    pub fn transfer(&self, id: u64) -> Option<&Entry<TransferProposal>> {
        self.transfers.get(id)
    }

    /// Transfer ids filtered and windowed like [`Wallet::transaction_ids`]
    pub fn transfer_ids(
        &self,
        from: usize,
        to: usize,
        include_pending: bool,
        include_executed: bool,
    ) -> Vec<u64> {
        self.transfers.ids(from, to, include_pending, include_executed)
    }

    /// Count of transfers matching the filter pair
    pub fn transfer_count(&self, include_pending: bool, include_executed: bool) -> usize {
        self.transfers.count(include_pending, include_executed)
    }

    /// Whether a transfer currently meets the confirmation threshold
    pub fn is_transfer_confirmed(&self, id: u64) -> Result<bool, WalletError> {
        let entry = self.transfers.get(id).ok_or(WalletError::NotFound(id))?;
        Ok(self.meets_threshold(&entry.confirmations))
    }

    /// Observable state of a transfer
    pub fn transfer_state(&self, id: u64) -> Result<EntryState, WalletError> {
        let entry = self.transfers.get(id).ok_or(WalletError::NotFound(id))?;
        Ok(self.entry_state(entry.executed, &entry.confirmations))
    }

    // =========================================================================
    // Execution engine
    // =========================================================================

    /// Threshold check against current registry membership
    fn meets_threshold(&self, confirmations: &[String]) -> bool {
        self.registry.live_confirmations(confirmations) >= self.registry.required()
    }

    fn entry_state(&self, executed: bool, confirmations: &[String]) -> EntryState {
        if executed {
            EntryState::Executed
        } else if self.meets_threshold(confirmations) {
            EntryState::Confirmed
        } else {
            EntryState::Pending
        }
    }

    fn check_token(&self, token: &dyn TokenContract) -> Result<(), WalletError> {
        if token.address() != self.token_address {
            return Err(WalletError::TokenMismatch {
                expected: self.token_address.clone(),
                got: token.address().to_string(),
            });
        }
        Ok(())
    }

    /// Attempt execution of a transaction whose threshold may be met
    ///
    /// Returns the entry's state afterwards. An effect failure leaves
    /// the entry not-executed with all confirmations retained and
    /// surfaces as [`WalletError::ExecutionFailed`].
    fn try_execute_transaction(
        &mut self,
        id: u64,
        dispatcher: &mut dyn CallDispatcher,
    ) -> Result<EntryState, WalletError> {
        let entry = self.transactions.get(id).ok_or(WalletError::NotFound(id))?;
        if entry.executed {
            return Ok(EntryState::Executed);
        }
        if !self.meets_threshold(&entry.confirmations) {
            return Ok(EntryState::Pending);
        }

        let effect = entry.effect.clone();
        let result = if effect.target == self.address {
            // Self-addressed: the payload is a registry mutation. The
            // registry validates before mutating, so a rejected call
            // changes nothing.
            RegistryCall::decode(&effect.payload)
                .map_err(|e| e.to_string())
                .and_then(|call| self.apply_registry_call(call).map_err(|e| e.to_string()))
        } else {
            dispatcher
                .dispatch(&self.address, &effect.target, effect.value, &effect.payload)
                .map_err(|e| e.to_string())
        };

        match result {
            Ok(()) => {
                self.mark_transaction_executed(id);
                log::info!("Wallet {}: transaction {} executed", self.address, id);
                Ok(EntryState::Executed)
            }
            Err(reason) => {
                log::warn!(
                    "Wallet {}: transaction {} execution failed: {}",
                    self.address,
                    id,
                    reason
                );
                Err(WalletError::ExecutionFailed { id, reason })
            }
        }
    }

    fn apply_registry_call(&mut self, call: RegistryCall) -> Result<(), WalletError> {
        match call {
            RegistryCall::AddOwner { owner } => self.registry.add_owner(&owner),
            RegistryCall::RemoveOwner { owner } => self.registry.remove_owner(&owner),
            RegistryCall::ChangeRequirement { required } => {
                self.registry.change_requirement(required)
            }
        }
    }

    fn mark_transaction_executed(&mut self, id: u64) {
        if let Some(entry) = self.transactions.get_mut(id) {
            entry.executed = true;
        }
    }

    /// Attempt execution of a transfer whose threshold may be met
    fn try_execute_transfer(
        &mut self,
        id: u64,
        token: &mut dyn TokenContract,
    ) -> Result<EntryState, WalletError> {
        let entry = self.transfers.get(id).ok_or(WalletError::NotFound(id))?;
        if entry.executed {
            return Ok(EntryState::Executed);
        }
        if !self.meets_threshold(&entry.confirmations) {
            return Ok(EntryState::Pending);
        }

        let effect = entry.effect.clone();
        match token.transfer(&self.address, &effect.destination, effect.amount) {
            Ok(()) => {
                if let Some(entry) = self.transfers.get_mut(id) {
                    entry.executed = true;
                }
                log::info!(
                    "Wallet {}: transfer {} executed ({} -> {})",
                    self.address,
                    id,
                    effect.amount,
                    effect.destination
                );
                Ok(EntryState::Executed)
            }
            Err(e) => {
                log::warn!(
                    "Wallet {}: transfer {} execution failed: {}",
                    self.address,
                    id,
                    e
                );
                Err(WalletError::ExecutionFailed {
                    id,
                    reason: e.to_string(),
                })
            }
        }
    }
}
