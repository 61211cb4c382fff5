//! Allium Miner Library
//!
//! CPU hasher and miner for the Allium proof-of-work function.
//!
//! # Overview
//!
//! The hash itself lives in `allium-core` and is re-exported here as
//! [`algorithm`]. This crate adds what a miner needs around it: a config
//! file, logging and a multi-threaded nonce search with progress reports.
//!
//! # Example
//!
//! ```rust
//! use allium::algorithm::{compute, meets_difficulty, write_nonce};
//!
//! // Zero header with nonce 121
//! let mut header = [0u8; 80];
//! write_nonce(&mut header, 121);
//!
//! // Compute hash
//! let result = compute(&header).unwrap();
//!
//! // Check if it meets difficulty requirement
//! assert!(meets_difficulty(&result, 8));
//! ```

// Re-export the core algorithm
pub use allium_core as algorithm;

pub mod config;
pub mod logging;
pub mod miner;

// Convenience re-exports
pub use algorithm::{AlliumError, BlockHeader, compute, hash, meets_difficulty};
pub use config::MinerConfig;
pub use miner::{Miner, MiningReport};
