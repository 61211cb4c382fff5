//! The Allium chain
//!
//! Six primitives run in strict sequence over two 32-byte scratch buffers:
//!
//! ```text
//! A = BLAKE-256(header)
//! B = Keccak-256(A)
//! A = Lyra2(pwd = B, salt = B, t = 1, R = 8, C = 8)
//! B = CubeHash-256(A)        result is overwritten unread
//! B = Skein-256(A)           reads the Lyra2 output
//! A = Groestl-256(B)
//! ```
//!
//! The CubeHash output never feeds a later stage.

use crate::error::{AlliumError, Result, Stage};
use crate::params::HEADER_SIZE;
use crate::primitives::{
    Digest, Lyra2Params, blake256, cubehash256, groestl256, keccak256, lyra2, skein256,
};

/// Lyra2 cost used by the chain
pub const LYRA2_PARAMS: Lyra2Params = Lyra2Params {
    time_cost: crate::params::LYRA2_TIME_COST,
    rows: crate::params::LYRA2_ROWS,
    cols: crate::params::LYRA2_COLS,
};

/// Output of every stage of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageTrace {
    pub blake: Digest,
    pub keccak: Digest,
    pub lyra2: Digest,
    pub cubehash: Digest,
    pub skein: Digest,
    pub groestl: Digest,
}

impl StageTrace {
    /// Stage outputs in pipeline order
    pub fn stages(&self) -> [(Stage, &Digest); 6] {
        [
            (Stage::Blake, &self.blake),
            (Stage::Keccak, &self.keccak),
            (Stage::Lyra2, &self.lyra2),
            (Stage::CubeHash, &self.cubehash),
            (Stage::Skein, &self.skein),
            (Stage::Groestl, &self.groestl),
        ]
    }

    /// The final digest
    pub fn digest(&self) -> Digest {
        self.groestl
    }

    fn record(&mut self, stage: Stage, digest: &Digest) {
        let slot = match stage {
            Stage::Blake => &mut self.blake,
            Stage::Keccak => &mut self.keccak,
            Stage::Lyra2 => &mut self.lyra2,
            Stage::CubeHash => &mut self.cubehash,
            Stage::Skein => &mut self.skein,
            Stage::Groestl => &mut self.groestl,
        };
        *slot = *digest;
    }
}

/// Run the chain, handing every stage output to `observe`.
fn run(header: &[u8; HEADER_SIZE], mut observe: impl FnMut(Stage, &Digest)) -> Result<Digest> {
    let mut hash_a: Digest = blake256(header);
    observe(Stage::Blake, &hash_a);

    let mut hash_b: Digest = keccak256(&hash_a);
    observe(Stage::Keccak, &hash_b);

    hash_a = lyra2(&hash_b, &hash_b, &LYRA2_PARAMS)?;
    observe(Stage::Lyra2, &hash_a);

    hash_b = cubehash256(&hash_a)?;
    observe(Stage::CubeHash, &hash_b);

    hash_b = skein256(&hash_a);
    observe(Stage::Skein, &hash_b);

    hash_a = groestl256(&hash_b);
    observe(Stage::Groestl, &hash_a);

    Ok(hash_a)
}

/// Compute the Allium digest of an 80-byte block header.
///
/// # Example
///
/// ```rust
/// use allium_core::compute;
///
/// let digest = compute(&[0u8; 80]).unwrap();
/// assert_eq!(digest.len(), 32);
/// assert_eq!(digest[0], 0xdb);
/// ```
pub fn compute(header: &[u8; HEADER_SIZE]) -> Result<Digest> {
    run(header, |_, _| {})
}

/// Compute the digest and keep every intermediate stage output.
pub fn compute_traced(header: &[u8; HEADER_SIZE]) -> Result<StageTrace> {
    let mut trace = StageTrace::default();
    run(header, |stage, digest| trace.record(stage, digest))?;
    Ok(trace)
}

/// Hash an arbitrary byte slice, rejecting anything that is not a full header.
///
/// Input is never truncated or padded.
pub fn hash(input: &[u8]) -> Result<Digest> {
    let header: &[u8; HEADER_SIZE] = input.try_into().map_err(|_| AlliumError::InvalidLength {
        expected: HEADER_SIZE,
        actual: input.len(),
    })?;
    compute(header)
}

/// Check if a hash meets the required difficulty
///
/// Difficulty is measured as the number of leading zero bits required,
/// counted from byte 0, most significant bit first.
///
/// # Example
///
/// ```rust
/// use allium_core::meets_difficulty;
///
/// // Hash with 20 leading zero bits (0x00, 0x00, 0x0F = 16 + 4 zeros)
/// let mut hash = [0xFFu8; 32];
/// hash[0] = 0x00;
/// hash[1] = 0x00;
/// hash[2] = 0x0F;
/// assert!(meets_difficulty(&hash, 16));
/// assert!(meets_difficulty(&hash, 20));
/// assert!(!meets_difficulty(&hash, 21));
/// ```
#[inline(always)]
pub fn meets_difficulty(hash: &Digest, difficulty: u32) -> bool {
    leading_zero_bits(hash) >= difficulty
}

/// Number of leading zero bits of a digest (256 for an all-zero digest)
#[inline(always)]
pub fn leading_zero_bits(hash: &Digest) -> u32 {
    let mut zero_bits = 0u32;

    for byte in hash.iter() {
        if *byte == 0 {
            zero_bits += 8;
        } else {
            zero_bits += byte.leading_zeros();
            break;
        }
    }

    zero_bits
}
