//! CLI commands for the multisig wallet
//!
//! Implements all command handlers for the CLI interface. State is
//! loaded from disk before each command and saved after every
//! successful mutation.

use crate::ledger::EntryState;
use crate::storage::{Storage, StorageConfig};
use crate::token::{Token, TokenContract};
use crate::wallet::{RegistryCall, WalletError, WalletManager};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub manager: WalletManager,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load application state from an initialized data directory
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let storage_config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };
        let storage = Storage::new(storage_config)?;

        if !storage.exists() {
            return Err(format!(
                "No wallet state at {:?}; run `multisig init` first",
                data_dir
            )
            .into());
        }

        let manager = storage.load()?;
        Ok(Self {
            manager,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.manager)?;
        Ok(())
    }
}

/// Initialize a new token and empty wallet set
pub fn cmd_init(data_dir: &Path, token_name: &str, token_symbol: &str) -> CliResult<()> {
    let storage_config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    let storage = Storage::new(storage_config)?;

    if storage.exists() {
        println!("⚠️  Wallet state already exists at {:?}", data_dir);
        return Ok(());
    }

    let token = Token::new(token_name, token_symbol);
    let manager = WalletManager::new(token);
    storage.save(&manager)?;

    println!("✅ Initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!(
        "   🪙 Token: {} ({}) at {}",
        token_name,
        token_symbol,
        manager.token().address()
    );

    Ok(())
}

/// Create a new multisig wallet
pub fn cmd_wallet_new(state: &mut AppState, owners: Vec<String>, required: usize) -> CliResult<()> {
    let wallet = state.manager.create_wallet(owners, required)?;
    let address = wallet.address().to_string();
    let description = wallet.registry().description();

    state.save()?;

    println!("🔐 Wallet created!");
    println!("   📍 Address: {}", address);
    println!("   👥 Policy: {}", description);

    Ok(())
}

/// List all wallets
pub fn cmd_wallet_list(state: &AppState) -> CliResult<()> {
    let wallets = state.manager.list_wallets();

    if wallets.is_empty() {
        println!("No wallets yet. Create one with `multisig wallet new`.");
        return Ok(());
    }

    println!("Wallets ({}):", wallets.len());
    for wallet in wallets {
        println!(
            "   {} [{}] balance {} | {} tx, {} transfers",
            wallet.address(),
            wallet.registry().description(),
            state.manager.balance_of(wallet.address()),
            wallet.transaction_count(true, true),
            wallet.transfer_count(true, true),
        );
    }

    Ok(())
}

/// Show one wallet with its ledgers
pub fn cmd_wallet_show(state: &AppState, address: &str) -> CliResult<()> {
    let wallet = state
        .manager
        .get_wallet(address)
        .ok_or_else(|| WalletError::WalletNotFound(address.to_string()))?;

    println!("Wallet {}", wallet.address());
    println!("   👥 Owners: {}", wallet.registry().owners().join(", "));
    println!("   🔢 Required confirmations: {}", wallet.required());
    println!("   🪙 Token contract: {}", wallet.token_contract());
    println!("   💰 Balance: {}", state.manager.balance_of(address));

    println!("   Transactions:");
    for id in wallet.transaction_ids(0, usize::MAX, true, true) {
        let entry = wallet.transaction(id).expect("listed id exists");
        println!(
            "      #{} -> {} (value {}, {} byte payload) [{}] confirmed by {}",
            id,
            entry.effect.target,
            entry.effect.value,
            entry.effect.payload.len(),
            wallet.transaction_state(id)?,
            entry.confirmations.join(", "),
        );
    }

    println!("   Transfers:");
    for id in wallet.transfer_ids(0, usize::MAX, true, true) {
        let entry = wallet.transfer(id).expect("listed id exists");
        println!(
            "      #{} {} -> {} [{}] confirmed by {}",
            id,
            entry.effect.amount,
            entry.effect.destination,
            wallet.transfer_state(id)?,
            entry.confirmations.join(", "),
        );
    }

    Ok(())
}

/// Issue tokens to an address
pub fn cmd_issue(state: &mut AppState, to: &str, amount: u64) -> CliResult<()> {
    state.manager.issue_tokens(to, amount);
    state.save()?;

    println!("🪙 Issued {} tokens to {}", amount, to);
    println!("   💰 New balance: {}", state.manager.balance_of(to));

    Ok(())
}

/// Show a token balance
pub fn cmd_balance(state: &AppState, address: &str) -> CliResult<()> {
    println!("💰 {}: {}", address, state.manager.balance_of(address));
    Ok(())
}

/// Print the outcome of a submission, including a failed eager execution
fn report_submission(kind: &str, result: Result<u64, WalletError>) -> CliResult<u64> {
    match result {
        Ok(id) => {
            println!("📝 {} #{} submitted (submitter auto-confirmed)", kind, id);
            Ok(id)
        }
        // The entry is committed; only its eager execution failed.
        Err(WalletError::ExecutionFailed { id, reason }) => {
            println!("📝 {} #{} submitted, but execution failed: {}", kind, id, reason);
            println!("   Confirmations are retained; retry with `execute` later.");
            Ok(id)
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the outcome of a confirmation or explicit execution
fn report_state(kind: &str, id: u64, result: Result<EntryState, WalletError>) -> CliResult<()> {
    match result {
        Ok(state) => {
            println!("✅ {} #{} is now {}", kind, id, state);
            Ok(())
        }
        Err(WalletError::ExecutionFailed { id, reason }) => {
            println!("⚠️  {} #{} confirmed, but execution failed: {}", kind, id, reason);
            println!("   Confirmations are retained; retry with `execute` later.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Submit a generic call proposal
pub fn cmd_submit(
    state: &mut AppState,
    wallet: &str,
    target: &str,
    value: u64,
    payload_hex: &str,
    from: &str,
) -> CliResult<()> {
    let payload = hex::decode(payload_hex)?;
    let result = state
        .manager
        .submit_transaction(wallet, target, value, payload, from);
    report_submission("Transaction", result)?;
    state.save()
}

/// Submit a self-addressed registry mutation proposal
pub fn cmd_propose_registry_change(
    state: &mut AppState,
    wallet: &str,
    call: RegistryCall,
    from: &str,
) -> CliResult<()> {
    let payload = call.encode();
    let result = state
        .manager
        .submit_transaction(wallet, wallet, 0, payload, from);
    report_submission("Transaction", result)?;
    state.save()
}

/// Confirm a transaction
pub fn cmd_confirm(state: &mut AppState, wallet: &str, id: u64, from: &str) -> CliResult<()> {
    let result = state.manager.confirm_transaction(wallet, id, from);
    report_state("Transaction", id, result)?;
    state.save()
}

/// Explicitly execute a transaction
pub fn cmd_execute(state: &mut AppState, wallet: &str, id: u64, from: &str) -> CliResult<()> {
    let result = state.manager.execute_transaction(wallet, id, from);
    report_state("Transaction", id, result)?;
    state.save()
}

/// Submit a token transfer proposal
pub fn cmd_submit_transfer(
    state: &mut AppState,
    wallet: &str,
    to: &str,
    amount: u64,
    from: &str,
) -> CliResult<()> {
    let result = state.manager.submit_transfer(wallet, to, amount, from);
    report_submission("Transfer", result)?;
    state.save()
}

/// Confirm a transfer
pub fn cmd_confirm_transfer(
    state: &mut AppState,
    wallet: &str,
    id: u64,
    from: &str,
) -> CliResult<()> {
    let result = state.manager.confirm_transfer(wallet, id, from);
    report_state("Transfer", id, result)?;
    state.save()
}

/// Explicitly execute a transfer
pub fn cmd_execute_transfer(
    state: &mut AppState,
    wallet: &str,
    id: u64,
    from: &str,
) -> CliResult<()> {
    let result = state.manager.execute_transfer(wallet, id, from);
    report_state("Transfer", id, result)?;
    state.save()
}
