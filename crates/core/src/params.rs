//! Allium Algorithm Parameters
//!
//! Fixed widths and cost settings of the composite hash. None of these are
//! tunable: changing any of them changes every digest.

/// Block header size in bytes (the only accepted input width)
pub const HEADER_SIZE: usize = 80;

/// Output size of every stage and of the final digest
pub const DIGEST_SIZE: usize = 32;

/// Byte offset of the little-endian `u32` nonce inside the header
pub const NONCE_OFFSET: usize = 76;

/// Size of the 32-bit nonce space (exclusive upper bound for search ranges)
pub const NONCE_SPACE: u64 = 1 << 32;

/// Lyra2 time cost (T)
pub const LYRA2_TIME_COST: u64 = 1;

/// Lyra2 memory matrix rows (R)
pub const LYRA2_ROWS: u64 = 8;

/// Lyra2 memory matrix columns (C)
pub const LYRA2_COLS: u64 = 8;

/// Lyra2 sponge block: 12 x 64-bit words
pub const LYRA2_BLOCK_SIZE: usize = 96;

/// Lyra2 memory matrix footprint at the Allium cost (6 KB)
pub const LYRA2_MATRIX_SIZE: usize = (LYRA2_ROWS * LYRA2_COLS) as usize * LYRA2_BLOCK_SIZE;

/// CubeHash revision 2: 160 init rounds, 16 rounds per 32-byte block, 160 final rounds
pub const CUBEHASH_REVISION: i32 = 2;

/// Algorithm name as exposed to callers
pub const ALGORITHM: &str = "allium";
