//! Multisig Wallet CLI
//!
//! A command-line interface for managing threshold-confirmation
//! wallets and routing token transfers between them.

use clap::{Parser, Subcommand};
use multisig_wallet::cli::{self, AppState};
use multisig_wallet::wallet::RegistryCall;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multisig")]
#[command(version = "0.1.0")]
#[command(about = "A threshold-confirmation multisig wallet engine", long_about = None)]
struct Cli {
    /// Data directory for wallet state
    #[arg(short, long, default_value = ".multisig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the token contract and an empty wallet set
    Init {
        /// Token name
        #[arg(long, default_value = "Test Token")]
        token_name: String,

        /// Token symbol
        #[arg(long, default_value = "TST")]
        token_symbol: String,
    },

    /// Wallet operations
    Wallet {
        #[command(subcommand)]
        action: WalletCommands,
    },

    /// Issue tokens to an address
    Issue {
        /// Recipient address
        #[arg(short, long)]
        to: String,

        /// Amount to issue
        #[arg(short, long)]
        amount: u64,
    },

    /// Show the token balance of an address
    Balance {
        /// Address to query
        address: String,
    },

    /// Submit a generic call proposal
    Submit {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Target address of the call
        #[arg(short, long)]
        target: String,

        /// Native value attached to the call
        #[arg(short, long, default_value = "0")]
        value: u64,

        /// Hex-encoded call payload
        #[arg(short, long, default_value = "")]
        payload: String,

        /// Submitting owner
        #[arg(short, long)]
        from: String,
    },

    /// Propose a registry mutation (self-addressed transaction)
    Propose {
        #[command(subcommand)]
        action: ProposeCommands,
    },

    /// Confirm a transaction
    Confirm {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Transaction id
        #[arg(short, long)]
        id: u64,

        /// Confirming owner
        #[arg(short, long)]
        from: String,
    },

    /// Explicitly execute a confirmed transaction
    Execute {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Transaction id
        #[arg(short, long)]
        id: u64,

        /// Executing owner (must have confirmed)
        #[arg(short, long)]
        from: String,
    },

    /// Token transfer proposals
    Transfer {
        #[command(subcommand)]
        action: TransferCommands,
    },
}

#[derive(Subcommand)]
enum WalletCommands {
    /// Create a new multisig wallet
    New {
        /// Comma-separated owner addresses
        #[arg(short, long, value_delimiter = ',')]
        owners: Vec<String>,

        /// Required confirmation threshold
        #[arg(short, long)]
        required: usize,
    },

    /// List all wallets
    List,

    /// Show one wallet with its ledgers
    Show {
        /// Wallet address
        address: String,
    },
}

#[derive(Subcommand)]
enum ProposeCommands {
    /// Propose adding an owner
    AddOwner {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Owner to add
        #[arg(short, long)]
        owner: String,

        /// Submitting owner
        #[arg(short, long)]
        from: String,
    },

    /// Propose removing an owner
    RemoveOwner {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Owner to remove
        #[arg(short, long)]
        owner: String,

        /// Submitting owner
        #[arg(short, long)]
        from: String,
    },

    /// Propose changing the confirmation threshold
    Requirement {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// New required confirmation count
        #[arg(short, long)]
        required: usize,

        /// Submitting owner
        #[arg(short, long)]
        from: String,
    },
}

#[derive(Subcommand)]
enum TransferCommands {
    /// Submit a token transfer proposal
    Submit {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Destination address
        #[arg(short, long)]
        to: String,

        /// Token amount
        #[arg(short, long)]
        amount: u64,

        /// Submitting owner
        #[arg(short, long)]
        from: String,
    },

    /// Confirm a transfer
    Confirm {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Transfer id
        #[arg(short, long)]
        id: u64,

        /// Confirming owner
        #[arg(short, long)]
        from: String,
    },

    /// Explicitly execute a confirmed transfer
    Execute {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,

        /// Transfer id
        #[arg(short, long)]
        id: u64,

        /// Executing owner (must have confirmed)
        #[arg(short, long)]
        from: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> cli::CliResult<()> {
    match cli.command {
        Commands::Init {
            token_name,
            token_symbol,
        } => cli::cmd_init(&cli.data_dir, &token_name, &token_symbol),

        Commands::Wallet { action } => {
            match action {
                WalletCommands::New { owners, required } => {
                    let mut state = AppState::load(cli.data_dir)?;
                    cli::cmd_wallet_new(&mut state, owners, required)
                }
                WalletCommands::List => {
                    let state = AppState::load(cli.data_dir)?;
                    cli::cmd_wallet_list(&state)
                }
                WalletCommands::Show { address } => {
                    let state = AppState::load(cli.data_dir)?;
                    cli::cmd_wallet_show(&state, &address)
                }
            }
        }

        Commands::Issue { to, amount } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::cmd_issue(&mut state, &to, amount)
        }

        Commands::Balance { address } => {
            let state = AppState::load(cli.data_dir)?;
            cli::cmd_balance(&state, &address)
        }

        Commands::Submit {
            wallet,
            target,
            value,
            payload,
            from,
        } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::cmd_submit(&mut state, &wallet, &target, value, &payload, &from)
        }

        Commands::Propose { action } => {
            let mut state = AppState::load(cli.data_dir)?;
            match action {
                ProposeCommands::AddOwner { wallet, owner, from } => {
                    cli::cmd_propose_registry_change(
                        &mut state,
                        &wallet,
                        RegistryCall::AddOwner { owner },
                        &from,
                    )
                }
                ProposeCommands::RemoveOwner { wallet, owner, from } => {
                    cli::cmd_propose_registry_change(
                        &mut state,
                        &wallet,
                        RegistryCall::RemoveOwner { owner },
                        &from,
                    )
                }
                ProposeCommands::Requirement {
                    wallet,
                    required,
                    from,
                } => cli::cmd_propose_registry_change(
                    &mut state,
                    &wallet,
                    RegistryCall::ChangeRequirement { required },
                    &from,
                ),
            }
        }

        Commands::Confirm { wallet, id, from } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::cmd_confirm(&mut state, &wallet, id, &from)
        }

        Commands::Execute { wallet, id, from } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::cmd_execute(&mut state, &wallet, id, &from)
        }

        Commands::Transfer { action } => {
            let mut state = AppState::load(cli.data_dir)?;
            match action {
                TransferCommands::Submit {
                    wallet,
                    to,
                    amount,
                    from,
                } => cli::cmd_submit_transfer(&mut state, &wallet, &to, amount, &from),
                TransferCommands::Confirm { wallet, id, from } => {
                    cli::cmd_confirm_transfer(&mut state, &wallet, id, &from)
                }
                TransferCommands::Execute { wallet, id, from } => {
                    cli::cmd_execute_transfer(&mut state, &wallet, id, &from)
                }
            }
        }
    }
}
