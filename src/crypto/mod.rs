//! Hashing utilities
//!
//! SHA-256 based helpers used for deterministic wallet and token
//! address derivation.

pub mod hash;

pub use hash::{double_sha256, sha256, sha256_hex};
