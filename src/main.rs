//! Allium CLI
//!
//! A command-line tool for hashing block headers with Allium and mining
//! nonces on the CPU.
//!
//! # Commands
//!
//! - `hash` - Hash an 80-byte header
//! - `mine` - Search for a nonce meeting a difficulty (multi-threaded)
//! - `verify` - Recompute a header digest and compare
//! - `benchmark` - Run performance benchmark
//! - `params` - Show algorithm parameters

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use allium::algorithm::{
    self, BlockHeader, Digest, HEADER_SIZE, NONCE_SPACE, SearchProgress, compute, compute_traced,
    leading_zero_bits,
};
use allium::config::MinerConfig;
use allium::logging::init_logging;
use allium::miner::{self, Miner};

#[derive(Parser)]
#[command(name = "allium")]
#[command(version)]
#[command(about = "Allium proof-of-work hasher and CPU miner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ./allium.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash an 80-byte block header given as hex
    Hash {
        /// The header (160 hex characters)
        header: String,

        /// Print the output of every stage
        #[arg(long)]
        trace: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search for a nonce whose digest meets the difficulty
    Mine {
        /// The header to mine on; its nonce field is overwritten
        #[arg(long)]
        header: String,

        /// Target difficulty (number of leading zero bits)
        #[arg(short, long)]
        difficulty: Option<u32>,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// First nonce to try
        #[arg(long, default_value = "0")]
        start: u64,

        /// End of the nonce range (exclusive)
        #[arg(long, default_value_t = NONCE_SPACE)]
        end: u64,
    },

    /// Recompute a header digest and compare it with an expected value
    Verify {
        /// The header (160 hex characters)
        #[arg(long)]
        header: String,

        /// Expected digest (64 hex characters)
        #[arg(long)]
        expect: String,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "100")]
        count: u32,
    },

    /// Show algorithm parameters
    Params,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Hash {
            header,
            trace,
            json,
        } => cmd_hash(&header, trace, json),
        Commands::Mine {
            header,
            difficulty,
            threads,
            start,
            end,
        } => cmd_mine(cli.config, &header, difficulty, threads, start..end),
        Commands::Verify { header, expect } => cmd_verify(&header, &expect),
        Commands::Benchmark { count } => cmd_benchmark(count),
        Commands::Params => cmd_params(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn parse_header(input: &str) -> anyhow::Result<[u8; HEADER_SIZE]> {
    let bytes = hex::decode(strip_hex_prefix(input)).context("Header is not valid hex")?;
    let header = BlockHeader::from_bytes(&bytes).context("Header must be exactly 80 bytes")?;
    Ok(header.to_bytes())
}

fn parse_digest(input: &str) -> anyhow::Result<Digest> {
    let bytes = hex::decode(strip_hex_prefix(input)).context("Digest is not valid hex")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("Digest must be 32 bytes, got {}", len))
}

fn strip_hex_prefix(input: &str) -> &str {
    let input = input.trim();
    input.strip_prefix("0x").unwrap_or(input)
}

#[derive(Serialize)]
struct StageOutput {
    stage: String,
    digest: String,
}

#[derive(Serialize)]
struct HashOutput {
    header: String,
    digest: String,
    leading_zero_bits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stages: Option<Vec<StageOutput>>,
}

fn cmd_hash(header_hex: &str, trace: bool, json: bool) -> anyhow::Result<()> {
    let header = parse_header(header_hex)?;

    let (digest, stages) = if trace {
        let trace = compute_traced(&header)?;
        let stages: Vec<StageOutput> = trace
            .stages()
            .iter()
            .map(|(stage, digest)| {
                log::debug!("{}: {}", stage, hex::encode(digest));
                StageOutput {
                    stage: stage.to_string(),
                    digest: hex::encode(digest),
                }
            })
            .collect();
        (trace.digest(), Some(stages))
    } else {
        (compute(&header)?, None)
    };

    let output = HashOutput {
        header: hex::encode(header),
        digest: hex::encode(digest),
        leading_zero_bits: leading_zero_bits(&digest),
        stages,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(stages) = &output.stages {
        for stage in stages {
            println!("{:<14} {}", stage.stage, stage.digest);
        }
        println!();
    }
    println!("{}", output.digest);

    Ok(())
}

fn cmd_mine(
    config_path: Option<PathBuf>,
    header_hex: &str,
    difficulty: Option<u32>,
    threads: Option<usize>,
    range: std::ops::Range<u64>,
) -> anyhow::Result<()> {
    let header = parse_header(header_hex)?;
    let config = MinerConfig::load(config_path.as_deref())?.with_overrides(threads, difficulty);
    let miner = Miner::new(config)?;

    println!("\n=== Allium Miner ===");
    println!("Header: {}", hex::encode(&header[..algorithm::NONCE_OFFSET]));
    println!("Difficulty: {} bits", miner.config().difficulty);
    println!("Threads: {}", miner.config().threads);
    println!("Nonces: {}..{}", range.start, range.end);
    println!("====================\n");

    let progress = SearchProgress::new();
    let report = miner.mine(&header, range, &progress, |tick| {
        print!(
            "\rHashrate: {:.0} H/s | Hashes: {} | Time: {:.0}s",
            tick.hashrate(),
            tick.hashes,
            tick.elapsed.as_secs_f64()
        );
        std::io::stdout().flush().ok();
    })?;

    match report.solution {
        Some(solution) => {
            let mut solved = header;
            algorithm::write_nonce(&mut solved, solution.nonce);

            println!("\n\nFound valid nonce!");
            println!("  Nonce:  {}", solution.nonce);
            println!("  Hash:   {}", hex::encode(solution.hash));
            println!("  Header: {}", hex::encode(solved));
            println!(
                "  Hashes: {} ({:.0} H/s)",
                report.hashes,
                report.hashrate()
            );
            Ok(())
        }
        None => anyhow::bail!(
            "No nonce found after {} hashes in {:.1}s",
            report.hashes,
            report.elapsed.as_secs_f64()
        ),
    }
}

fn cmd_verify(header_hex: &str, expect_hex: &str) -> anyhow::Result<()> {
    let header = parse_header(header_hex)?;
    let expected = parse_digest(expect_hex)?;
    let actual = compute(&header)?;

    if actual != expected {
        anyhow::bail!(
            "Digest mismatch: expected {}, computed {}",
            hex::encode(expected),
            hex::encode(actual)
        );
    }

    println!("OK {}", hex::encode(actual));
    Ok(())
}

fn cmd_benchmark(count: u32) -> anyhow::Result<()> {
    println!("Running benchmark with {} hashes...", count);

    let report = miner::benchmark(count)?;

    println!("\nResults:");
    println!("  Total hashes: {}", report.hashes);
    println!("  Time elapsed: {:.2}s", report.elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", report.hashrate());

    println!("\nAlgorithm parameters:");
    print_params();

    Ok(())
}

fn cmd_params() -> anyhow::Result<()> {
    print_params();
    Ok(())
}

fn print_params() {
    let stages: Vec<String> = algorithm::Stage::ALL
        .iter()
        .map(|stage| stage.to_string())
        .collect();

    println!("  Algorithm: {}", algorithm::ALGORITHM);
    println!("  Input: {} bytes", HEADER_SIZE);
    println!("  Output: {} bytes", algorithm::DIGEST_SIZE);
    println!("  Stages: {}", stages.join(" -> "));
    println!(
        "  Lyra2: t = {}, {} x {} matrix ({} KB)",
        algorithm::LYRA2_PARAMS.time_cost,
        algorithm::LYRA2_PARAMS.rows,
        algorithm::LYRA2_PARAMS.cols,
        algorithm::LYRA2_MATRIX_SIZE / 1024
    );
    println!("  CubeHash: revision {}", algorithm::CUBEHASH_REVISION);
    println!("  Nonce: u32 LE at offset {}", algorithm::NONCE_OFFSET);
}
