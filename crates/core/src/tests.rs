//! Tests for the Allium pipeline

use crate::primitives::{cubehash256, skein256};
use crate::{
    AlliumError, BlockHeader, HEADER_SIZE, Stage, compute, compute_traced, hash,
    leading_zero_bits, meets_difficulty, write_nonce,
};

const ZERO_DIGEST: &str = "dba5e0ec33bc004cd1371371784fa34e6f8869d31fdb5aa614f45bba66ff213a";

fn header_from_hex(s: &str) -> [u8; HEADER_SIZE] {
    hex::decode(s).unwrap().try_into().unwrap()
}

fn diff_bits(a: &[u8; 32], b: &[u8; 32]) -> u32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
}

#[test]
fn test_basic_hash() {
    let header = [0u8; HEADER_SIZE];
    let result = compute(&header).unwrap();

    // Hash should be 32 bytes
    assert_eq!(result.len(), 32);

    // Hash should be deterministic
    let result2 = compute(&header).unwrap();
    assert_eq!(result, result2);
}

#[test]
fn test_known_vectors() {
    let cases: [([u8; HEADER_SIZE], &str); 3] = [
        ([0x00; HEADER_SIZE], ZERO_DIGEST),
        (
            [0xFF; HEADER_SIZE],
            "757ff8bdedb84c5f9548f080c9b2db7f6c60b94850d954221e9d66ef1fa4cd3d",
        ),
        (
            core::array::from_fn(|i| i as u8),
            "4bc0ee0108d02aa4f58dea1be997ba613b938e2badb5e73b1d44c944f84b8488",
        ),
    ];

    for (header, expected) in cases {
        assert_eq!(hex::encode(compute(&header).unwrap()), expected);
    }
}

#[test]
fn test_bitcoin_genesis_header() {
    let header = header_from_hex(
        "0100000000000000000000000000000000000000000000000000000000000000\
         000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa\
         4b1e5e4a29ab5f49ffff001d1dac2b7c",
    );

    assert_eq!(
        hex::encode(compute(&header).unwrap()),
        "c2d44640d625f94a4e1285f81119e236e974ade6e0b2d3f4c562b6633b64b7ae"
    );
    assert_eq!(
        BlockHeader::from_bytes(&header).unwrap().hash().unwrap(),
        compute(&header).unwrap()
    );
}

/// Zero header, stage by stage:
/// BLAKE-256 -> Keccak-256 -> Lyra2(1, 8, 8) -> CubeHash-256 (discarded)
/// -> Skein-256 on the Lyra2 output -> Groestl-256
#[test]
fn test_zero_header_trace() {
    let trace = compute_traced(&[0u8; HEADER_SIZE]).unwrap();

    assert_eq!(
        hex::encode(trace.blake),
        "0c7b159452328517463db487df5e39b71322afaf14ed562ce9d18d7d9051b305"
    );
    assert_eq!(
        hex::encode(trace.keccak),
        "5d61a1e10d7c3e77496dc9b60ec4f6ebaf63726ae552b9c02dc0d9efd91a8727"
    );
    assert_eq!(
        hex::encode(trace.lyra2),
        "4f229ca3d3251bb35fcb83d9d2e78eb3d6e536b28b3e30b6545fb2a37f8bd0bd"
    );
    assert_eq!(
        hex::encode(trace.cubehash),
        "649cd3d54947eb9a7c6e0a9b1e3633c19caeca77a921e285ec8e8927b4155c95"
    );
    assert_eq!(
        hex::encode(trace.skein),
        "b1ad4de4e4e3e71fa44f2ffd9ab590f92cce10de79be3eff6d512b5702eb9dcf"
    );
    assert_eq!(hex::encode(trace.groestl), ZERO_DIGEST);
    assert_eq!(trace.digest(), compute(&[0u8; HEADER_SIZE]).unwrap());
}

#[test]
fn test_skein_reads_lyra2_output() {
    let trace = compute_traced(&[0x5Au8; HEADER_SIZE]).unwrap();

    assert_eq!(trace.cubehash, cubehash256(&trace.lyra2).unwrap());
    assert_eq!(trace.skein, skein256(&trace.lyra2));
    assert_ne!(trace.skein, skein256(&trace.cubehash));
}

#[test]
fn test_trace_stage_order() {
    let trace = compute_traced(&[0u8; HEADER_SIZE]).unwrap();
    let stages: Vec<Stage> = trace.stages().iter().map(|(stage, _)| *stage).collect();

    assert_eq!(stages, Stage::ALL.to_vec());
    assert_eq!(*trace.stages()[5].1, trace.groestl);
}

#[test]
fn test_boundary_rejection() {
    for len in [0usize, 79, 81] {
        let input = vec![0u8; len];
        assert_eq!(
            hash(&input),
            Err(AlliumError::InvalidLength {
                expected: HEADER_SIZE,
                actual: len
            }),
            "length {} should be rejected",
            len
        );
    }

    assert_eq!(hex::encode(hash(&[0u8; 80]).unwrap()), ZERO_DIGEST);
}

#[test]
fn test_different_inputs_produce_different_hashes() {
    let mut header = [0u8; HEADER_SIZE];
    let hash1 = compute(&header).unwrap();
    write_nonce(&mut header, 1);
    let hash2 = compute(&header).unwrap();

    assert_ne!(hash1, hash2);
}

#[test]
fn test_avalanche_effect() {
    // Changing one bit should change ~50% of output bits
    let base = compute(&[0u8; HEADER_SIZE]).unwrap();

    for (byte, bit) in [(0usize, 0x01u8), (40, 0x10), (79, 0x80)] {
        let mut header = [0u8; HEADER_SIZE];
        header[byte] ^= bit;
        let flipped = compute(&header).unwrap();

        let diff = diff_bits(&base, &flipped);
        assert!(
            (80..=176).contains(&diff),
            "Avalanche effect: {} bits differ flipping byte {} (expected ~128)",
            diff,
            byte
        );
    }
}

#[test]
fn test_difficulty_check() {
    // Hash with 8 leading zero bits (starts with 0x00)
    let mut hash_8_zeros = [0xFFu8; 32];
    hash_8_zeros[0] = 0x00;

    assert!(meets_difficulty(&hash_8_zeros, 8));
    assert!(!meets_difficulty(&hash_8_zeros, 9));

    // Hash with 16 leading zero bits (starts with 0x0000)
    let mut hash_16_zeros = [0xFFu8; 32];
    hash_16_zeros[..2].fill(0x00);

    assert!(meets_difficulty(&hash_16_zeros, 16));
    assert!(!meets_difficulty(&hash_16_zeros, 17));

    // Hash with leading 0x0F (4 zero bits)
    let mut hash_4_zeros = [0xFFu8; 32];
    hash_4_zeros[0] = 0x0F;

    assert!(meets_difficulty(&hash_4_zeros, 4));
    assert!(!meets_difficulty(&hash_4_zeros, 5));
}

#[test]
fn test_difficulty_extremes() {
    let zero = [0u8; 32];
    let ones = [0xFFu8; 32];

    assert!(meets_difficulty(&ones, 0));
    assert!(!meets_difficulty(&ones, 1));
    assert_eq!(leading_zero_bits(&zero), 256);
    assert!(meets_difficulty(&zero, 256));
    assert!(!meets_difficulty(&zero, 257));
}

#[test]
fn test_search_vectors_from_zero_header() {
    let digest_at = |nonce: u32| {
        let mut header = [0u8; HEADER_SIZE];
        write_nonce(&mut header, nonce);
        compute(&header).unwrap()
    };

    assert_eq!(hex::encode(digest_at(0)), ZERO_DIGEST);
    assert_eq!(leading_zero_bits(&digest_at(0)), 0);
    assert!(meets_difficulty(&digest_at(1), 1));
    assert!(meets_difficulty(&digest_at(14), 4));
    assert!(meets_difficulty(&digest_at(121), 8));

    let first_4 = (0..400).find(|n| meets_difficulty(&digest_at(*n), 4));
    assert_eq!(first_4, Some(14));
}

#[test]
fn test_threads_agree() {
    let headers: Vec<[u8; HEADER_SIZE]> = (0..4u8)
        .map(|i| {
            let mut header = [i; HEADER_SIZE];
            write_nonce(&mut header, i as u32 * 1000);
            header
        })
        .collect();
    let expected: Vec<_> = headers.iter().map(|h| compute(h).unwrap()).collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let headers = &headers;
                s.spawn(move || {
                    (0..headers.len())
                        .map(|i| compute(&headers[(i + t) % headers.len()]).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for (t, handle) in handles.into_iter().enumerate() {
            let results = handle.join().unwrap();
            for (i, result) in results.iter().enumerate() {
                assert_eq!(*result, expected[(i + t) % headers.len()]);
            }
        }
    });
}

#[test]
#[ignore] // Run with: cargo test timing_breakdown -- --ignored --nocapture
fn timing_breakdown() {
    use crate::allium::LYRA2_PARAMS;
    use crate::primitives::{blake256, groestl256, keccak256, lyra2};
    use std::time::{Duration, Instant};

    let header = [0u8; HEADER_SIZE];
    let iterations = 200u32;

    // Warmup
    for _ in 0..10 {
        let _ = compute(&header);
    }

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = compute(&header);
    }
    let per_hash = start.elapsed() / iterations;

    let state = [7u8; 32];
    let time = |f: &dyn Fn()| -> Duration {
        let start = Instant::now();
        for _ in 0..iterations {
            f();
        }
        start.elapsed() / iterations
    };

    let blake_time = time(&|| {
        let _ = blake256(&header);
    });
    let keccak_time = time(&|| {
        let _ = keccak256(&state);
    });
    let lyra2_time = time(&|| {
        let _ = lyra2(&state, &state, &LYRA2_PARAMS);
    });
    let cube_time = time(&|| {
        let _ = cubehash256(&state);
    });
    let skein_time = time(&|| {
        let _ = skein256(&state);
    });
    let groestl_time = time(&|| {
        let _ = groestl256(&state);
    });

    println!("\n=== TIMING BREAKDOWN ===");
    println!("Total per hash: {:?}", per_hash);
    println!("Hashrate: {:.1} H/s", 1.0 / per_hash.as_secs_f64());
    println!("\nStage timing:");
    println!("  BLAKE-256:    {:?}", blake_time);
    println!("  Keccak-256:   {:?}", keccak_time);
    println!("  Lyra2:        {:?}", lyra2_time);
    println!("  CubeHash-256: {:?}", cube_time);
    println!("  Skein-256:    {:?}", skein_time);
    println!("  Groestl-256:  {:?}", groestl_time);
}
