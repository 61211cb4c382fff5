//! # Allium Core Algorithm
//!
//! The Allium proof-of-work hash: six primitives chained over an 80-byte
//! block header.
//!
//! ## Pipeline
//!
//! ```text
//! header (80B)
//!   -> BLAKE-256
//!   -> Keccak-256
//!   -> Lyra2 (t = 1, 8 x 8 matrix)
//!   -> CubeHash-256   (computed, result unused)
//!   -> Skein-256      (over the Lyra2 output)
//!   -> Groestl-256
//!   -> digest (32B)
//! ```
//!
//! ## Input Format
//!
//! Input is exactly one 80-byte block header. The nonce is the little-endian
//! `u32` at offset 76:
//!
//! ```text
//! version (4) || prev_block (32) || merkle_root (32) || time (4) || bits (4) || nonce (4)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use allium_core::{compute, hash, meets_difficulty};
//!
//! // Fixed-size header
//! let digest = compute(&[0u8; 80]).unwrap();
//!
//! // Arbitrary slice, length checked
//! assert_eq!(hash(&[0u8; 80]).unwrap(), digest);
//! assert!(hash(&[0u8; 79]).is_err());
//!
//! // Check difficulty (leading zero bits)
//! if meets_difficulty(&digest, 16) {
//!     println!("Found hash with 16+ leading zero bits!");
//! }
//! ```

mod allium;
mod error;
mod header;
mod params;
pub mod primitives;
mod search;

pub mod ffi;

pub use allium::{
    LYRA2_PARAMS, StageTrace, compute, compute_traced, hash, leading_zero_bits, meets_difficulty,
};
pub use error::{AlliumError, Result, Stage};
pub use header::BlockHeader;
pub use params::*;
pub use primitives::{Digest, Lyra2Params};
#[cfg(feature = "parallel")]
pub use search::par_scan;
pub use search::{SearchProgress, Solution, read_nonce, scan, split_nonce_space, write_nonce};

#[cfg(test)]
mod tests;
