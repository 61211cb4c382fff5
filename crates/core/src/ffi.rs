//! C FFI bindings
//!
//! Status codes: `0` ok, `-1` null pointer, `-2` input is not 80 bytes,
//! `-3` a primitive failed. The output buffer is left untouched on error.

use crate::error::AlliumError;
use crate::params::{DIGEST_SIZE, HEADER_SIZE};
use crate::search::write_nonce;
use crate::{compute, hash, meets_difficulty};
use core::slice;

pub const ALLIUM_OK: i32 = 0;
pub const ALLIUM_ERR_NULL: i32 = -1;
pub const ALLIUM_ERR_LENGTH: i32 = -2;
pub const ALLIUM_ERR_PRIMITIVE: i32 = -3;

fn status(err: &AlliumError) -> i32 {
    match err {
        AlliumError::InvalidLength { .. } => ALLIUM_ERR_LENGTH,
        _ => ALLIUM_ERR_PRIMITIVE,
    }
}

/// Compute the Allium digest of an 80-byte header
/// - input: pointer to header bytes
/// - input_len: must be 80
/// - output: pointer to 32-byte buffer for result
#[unsafe(no_mangle)]
pub extern "C" fn allium_hash(input: *const u8, input_len: usize, output: *mut u8) -> i32 {
    if input.is_null() || output.is_null() {
        return ALLIUM_ERR_NULL;
    }

    let input_slice = unsafe { slice::from_raw_parts(input, input_len) };
    match hash(input_slice) {
        Ok(result) => {
            let output_slice = unsafe { slice::from_raw_parts_mut(output, DIGEST_SIZE) };
            output_slice.copy_from_slice(&result);
            ALLIUM_OK
        }
        Err(e) => status(&e),
    }
}

/// Returns 1 if the 32-byte hash has at least `difficulty` leading zero bits,
/// 0 if not, -1 on a null pointer
#[unsafe(no_mangle)]
pub extern "C" fn allium_meets_difficulty(hash: *const u8, difficulty: u32) -> i32 {
    if hash.is_null() {
        return ALLIUM_ERR_NULL;
    }

    let mut digest = [0u8; DIGEST_SIZE];
    digest.copy_from_slice(unsafe { slice::from_raw_parts(hash, DIGEST_SIZE) });
    meets_difficulty(&digest, difficulty) as i32
}

/// Benchmark: compute N hashes and return total microseconds
#[unsafe(no_mangle)]
pub extern "C" fn allium_benchmark(iterations: u32) -> u64 {
    use std::time::Instant;

    let mut header = [0u8; HEADER_SIZE];

    let start = Instant::now();
    for i in 0..iterations {
        write_nonce(&mut header, i);
        let _ = compute(&header);
    }
    let elapsed = start.elapsed();

    elapsed.as_micros() as u64
}

/// Get hash rate (hashes per second) from a benchmark run
#[unsafe(no_mangle)]
pub extern "C" fn allium_hashrate(iterations: u32, microseconds: u64) -> f64 {
    if microseconds == 0 {
        return 0.0;
    }
    (iterations as f64) / (microseconds as f64 / 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    #[test]
    fn test_ffi_hash_zero_header() {
        let input = [0u8; HEADER_SIZE];
        let mut output = [0u8; DIGEST_SIZE];

        let rc = allium_hash(input.as_ptr(), input.len(), output.as_mut_ptr());

        assert_eq!(rc, ALLIUM_OK);
        assert_eq!(
            hex::encode(output),
            "dba5e0ec33bc004cd1371371784fa34e6f8869d31fdb5aa614f45bba66ff213a"
        );
    }

    #[test]
    fn test_ffi_hash_rejects_length() {
        let input = [0u8; HEADER_SIZE + 1];
        let mut output = [0xAAu8; DIGEST_SIZE];

        let rc = allium_hash(input.as_ptr(), 79, output.as_mut_ptr());
        assert_eq!(rc, ALLIUM_ERR_LENGTH);
        let rc = allium_hash(input.as_ptr(), 81, output.as_mut_ptr());
        assert_eq!(rc, ALLIUM_ERR_LENGTH);

        assert_eq!(output, [0xAAu8; DIGEST_SIZE]);
    }

    #[test]
    fn test_ffi_null_pointers() {
        let input = [0u8; HEADER_SIZE];
        let mut output = [0u8; DIGEST_SIZE];

        assert_eq!(
            allium_hash(ptr::null(), HEADER_SIZE, output.as_mut_ptr()),
            ALLIUM_ERR_NULL
        );
        assert_eq!(
            allium_hash(input.as_ptr(), HEADER_SIZE, ptr::null_mut()),
            ALLIUM_ERR_NULL
        );
        assert_eq!(allium_meets_difficulty(ptr::null(), 1), ALLIUM_ERR_NULL);
    }

    #[test]
    fn test_ffi_meets_difficulty() {
        let mut digest = [0xFFu8; DIGEST_SIZE];
        digest[0] = 0x00;

        assert_eq!(allium_meets_difficulty(digest.as_ptr(), 8), 1);
        assert_eq!(allium_meets_difficulty(digest.as_ptr(), 9), 0);
    }

    #[test]
    fn test_ffi_hashrate() {
        assert_eq!(allium_hashrate(10, 0), 0.0);
        assert_eq!(allium_hashrate(500, 1_000_000), 500.0);
    }
}
