//! Block header layout
//!
//! The pipeline treats a header as 80 opaque bytes. This view exists for
//! callers that build headers field by field; all integers are little-endian.

use crate::allium::compute;
use crate::error::{AlliumError, Result};
use crate::params::HEADER_SIZE;
use crate::primitives::Digest;
use crate::search::{read_nonce, write_nonce};

/// Structured 80-byte block header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockHeader {
    pub version: u32,
    pub prev_block: [u8; 32],
    pub merkle_root: [u8; 32],
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialize to the 80-byte wire layout
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(&self.prev_block);
        out[36..68].copy_from_slice(&self.merkle_root);
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        write_nonce(&mut out, self.nonce);
        out
    }

    /// Parse the 80-byte wire layout
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; HEADER_SIZE] = bytes.try_into().map_err(|_| AlliumError::InvalidLength {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        })?;

        Ok(Self {
            version: read_u32(bytes, 0),
            prev_block: read_32(bytes, 4),
            merkle_root: read_32(bytes, 36),
            time: read_u32(bytes, 68),
            bits: read_u32(bytes, 72),
            nonce: read_nonce(bytes),
        })
    }

    /// Allium digest of the serialized header
    pub fn hash(&self) -> Result<Digest> {
        compute(&self.to_bytes())
    }
}

#[inline(always)]
fn read_u32(bytes: &[u8; HEADER_SIZE], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline(always)]
fn read_32(bytes: &[u8; HEADER_SIZE], offset: usize) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes[offset..offset + 32]);
    out
}
