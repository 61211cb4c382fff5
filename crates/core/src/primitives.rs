//! Hash primitives chained by Allium
//!
//! Thin adapters over the ecosystem implementations. Each one pins the exact
//! variant the pipeline needs (round counts, padding, output width) and
//! returns a fixed 32-byte digest, so a wrong variant cannot slip in through
//! a default.

use crate::error::{AlliumError, Result, Stage};
use crate::params::{CUBEHASH_REVISION, DIGEST_SIZE};

/// A 256-bit stage output
pub type Digest = [u8; DIGEST_SIZE];

/// Lyra2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lyra2Params {
    /// Number of wandering passes (T)
    pub time_cost: u64,
    /// Memory matrix rows (R)
    pub rows: u64,
    /// Memory matrix columns (C)
    pub cols: u64,
}

impl Lyra2Params {
    /// Reject settings the Lyra2 leaf would panic on or mis-index.
    pub fn validate(&self) -> Result<()> {
        if self.time_cost < 1 {
            return Err(AlliumError::InvalidLyra2Params("time cost must be at least 1"));
        }
        if self.rows < 3 {
            return Err(AlliumError::InvalidLyra2Params("at least 3 rows are required"));
        }
        // Row indices are reduced with a mask, not a modulo
        if !self.rows.is_power_of_two() {
            return Err(AlliumError::InvalidLyra2Params("row count must be a power of two"));
        }
        if self.cols < 1 {
            return Err(AlliumError::InvalidLyra2Params("at least 1 column is required"));
        }
        Ok(())
    }
}

#[inline(always)]
fn fixed(bytes: &[u8]) -> Digest {
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(bytes);
    out
}

#[inline(always)]
fn exact(stage: Stage, bytes: Vec<u8>) -> Result<Digest> {
    let actual = bytes.len();
    bytes.try_into().map_err(|_| AlliumError::OutputSize {
        stage,
        expected: DIGEST_SIZE,
        actual,
    })
}

/// BLAKE-256 (14 rounds, the SHA-3 finalist)
#[inline(always)]
pub fn blake256(input: &[u8]) -> Digest {
    use blake_hash::Digest as _;
    fixed(&blake_hash::Blake256::digest(input))
}

/// Keccak-256 with the pre-FIPS `0x01` padding (not SHA3-256)
#[inline(always)]
pub fn keccak256(input: &[u8]) -> Digest {
    use sha3::Digest as _;
    fixed(&sha3::Keccak256::digest(input))
}

/// Lyra2 over the BLAKE2b sponge, squeezing a 32-byte key.
///
/// Password and salt must be whole 64-bit words: the sponge absorbs them
/// word by word and trailing bytes would be dropped without notice.
pub fn lyra2(password: &[u8], salt: &[u8], params: &Lyra2Params) -> Result<Digest> {
    params.validate()?;
    if password.len() % 8 != 0 || salt.len() % 8 != 0 {
        return Err(AlliumError::Lyra2InputAlignment {
            password: password.len(),
            salt: salt.len(),
        });
    }

    let key = ::lyra2::lyra2::lyra2(
        DIGEST_SIZE as u64,
        password.to_vec(),
        salt.to_vec(),
        params.time_cost,
        params.rows,
        params.cols,
    );
    exact(Stage::Lyra2, key)
}

/// CubeHash16/32-256, revision 2 (160 + 16/32 + 160)
pub fn cubehash256(input: &[u8]) -> Result<Digest> {
    let mut hasher = cubehash::CubeHashBest::new(cubehash::CubeHashParams {
        revision: CUBEHASH_REVISION,
        hash_len_bits: (DIGEST_SIZE * 8) as i32,
    });
    hasher.update(input);
    exact(Stage::CubeHash, hasher.finalize())
}

/// Skein-512 truncated to 256 bits (Skein 1.3)
#[inline(always)]
pub fn skein256(input: &[u8]) -> Digest {
    use skein::Digest as _;
    fixed(&skein::Skein512::<skein::consts::U32>::digest(input))
}

/// Groestl-256
#[inline(always)]
pub fn groestl256(input: &[u8]) -> Digest {
    use groestl::Digest as _;
    fixed(&groestl::Groestl256::digest(input))
}
