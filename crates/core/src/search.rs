//! Nonce search over a block header
//!
//! The nonce is the little-endian `u32` at [`NONCE_OFFSET`]. A search range
//! is a `Range<u64>` inside `0..NONCE_SPACE` so the exclusive upper bound
//! can name the whole space.

use core::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::allium::{compute, meets_difficulty};
use crate::error::{AlliumError, Result};
use crate::params::{HEADER_SIZE, NONCE_OFFSET, NONCE_SPACE};
use crate::primitives::Digest;

/// A nonce whose header digest meets the target difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub nonce: u32,
    pub hash: Digest,
}

/// Hash counter and stop flag shared by every worker of one search
#[derive(Debug, Default)]
pub struct SearchProgress {
    hashes: AtomicU64,
    stop: AtomicBool,
}

impl SearchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total digests computed so far
    pub fn hashes(&self) -> u64 {
        self.hashes.load(Ordering::Relaxed)
    }

    /// Ask every worker to finish after its current hash
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Clear the counter and the stop flag for a new round
    pub fn reset(&self) {
        self.stop.store(false, Ordering::SeqCst);
        self.hashes.store(0, Ordering::Relaxed);
    }

    #[inline(always)]
    fn record_hash(&self) {
        self.hashes.fetch_add(1, Ordering::Relaxed);
    }
}

/// Store `nonce` little-endian at the nonce offset
#[inline(always)]
pub fn write_nonce(header: &mut [u8; HEADER_SIZE], nonce: u32) {
    header[NONCE_OFFSET..].copy_from_slice(&nonce.to_le_bytes());
}

/// Read the little-endian nonce from the nonce offset
#[inline(always)]
pub fn read_nonce(header: &[u8; HEADER_SIZE]) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&header[NONCE_OFFSET..]);
    u32::from_le_bytes(bytes)
}

fn check_range(range: &Range<u64>) -> Result<()> {
    if range.start > range.end || range.end > NONCE_SPACE {
        return Err(AlliumError::InvalidNonceRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}

/// Split `range` into at most `workers` contiguous parts.
///
/// Parts never overlap and together cover the range exactly. The last part
/// takes the remainder. A range shorter than `workers` yields one part per
/// nonce rather than empty parts.
pub fn split_nonce_space(range: Range<u64>, workers: usize) -> Vec<Range<u64>> {
    let len = range.end.saturating_sub(range.start);
    if len == 0 {
        return Vec::new();
    }

    let parts = (workers.max(1) as u64).min(len);
    let base = len / parts;

    (0..parts)
        .map(|i| {
            let start = range.start + i * base;
            let end = if i + 1 == parts {
                range.end
            } else {
                start + base
            };
            start..end
        })
        .collect()
}

/// Scan `range` in ascending order for the first nonce meeting `difficulty`.
///
/// Returns `None` when the range is exhausted or another worker raised the
/// stop flag. A hit raises the stop flag itself.
pub fn scan(
    header: &[u8; HEADER_SIZE],
    difficulty: u32,
    range: Range<u64>,
    progress: &SearchProgress,
) -> Result<Option<Solution>> {
    check_range(&range)?;

    let mut candidate = *header;
    for nonce in range {
        if progress.is_stopped() {
            return Ok(None);
        }

        // check_range keeps every nonce below 2^32
        let nonce = nonce as u32;
        write_nonce(&mut candidate, nonce);

        let hash = compute(&candidate)?;
        progress.record_hash();

        if meets_difficulty(&hash, difficulty) {
            progress.stop();
            return Ok(Some(Solution { nonce, hash }));
        }
    }

    Ok(None)
}

/// Cut `part` into consecutive ranges of at most `chunk` nonces.
///
/// `chunk` is clamped to the part length, so any value is accepted.
#[cfg(feature = "parallel")]
fn chunks(part: Range<u64>, chunk: u64) -> impl Iterator<Item = Range<u64>> {
    let Range { start, end } = part;
    let len = end.saturating_sub(start);
    let chunk = chunk.clamp(1, len.max(1));

    (0..len.div_ceil(chunk)).map(move |i| {
        let lo = start + i * chunk;
        lo..lo.saturating_add(chunk).min(end)
    })
}

/// Scan `range` on the rayon pool.
///
/// The range is split into one part per pool thread; each part is walked
/// in `chunk`-sized pieces. No new piece starts once the stop flag is up.
/// Returns whichever solution is found first, not necessarily the lowest
/// nonce. The first pipeline error stops the search and is returned.
#[cfg(feature = "parallel")]
pub fn par_scan(
    header: &[u8; HEADER_SIZE],
    difficulty: u32,
    range: Range<u64>,
    chunk: u64,
    progress: &SearchProgress,
) -> Result<Option<Solution>> {
    check_range(&range)?;

    split_nonce_space(range, rayon::current_num_threads())
        .into_par_iter()
        .flat_map_iter(|part| chunks(part, chunk))
        .take_any_while(|_| !progress.is_stopped())
        .filter_map(|piece| match scan(header, difficulty, piece, progress) {
            Ok(found) => found.map(Ok),
            Err(e) => {
                progress.stop();
                Some(Err(e))
            }
        })
        .find_any(|_| true)
        .transpose()
}
