//! Wallet state persistence layer
//!
//! Provides save/load functionality for the wallet manager snapshot.
//! Writes go to a temporary file first and are renamed into place, so
//! a crash mid-save never leaves a truncated state file.

use crate::wallet::WalletManager;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub state_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".multisig_data"),
            state_file: "wallets.json".to_string(),
        }
    }
}

/// Wallet state storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the state file path
    fn state_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.state_file)
    }

    /// Save the wallet manager to disk
    pub fn save(&self, manager: &WalletManager) -> Result<(), StorageError> {
        let path = self.state_path();

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("wallets.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, manager)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the wallet manager from disk
    pub fn load(&self) -> Result<WalletManager, StorageError> {
        let path = self.state_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Wallet state file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let manager: WalletManager = serde_json::from_reader(reader)?;
        Ok(manager)
    }

    /// Check if a saved state exists
    pub fn exists(&self) -> bool {
        self.state_path().exists()
    }

    /// Delete the saved state
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
