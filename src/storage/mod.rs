//! State persistence
//!
//! Saves and loads the wallet manager snapshot as JSON.

pub mod persistence;

pub use persistence::{Storage, StorageConfig, StorageError};
