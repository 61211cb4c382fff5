//! Multi-threaded nonce search with periodic hashrate reports
//!
//! The search runs on a dedicated rayon pool sized from [`MinerConfig`].
//! A monitor thread wakes every report interval and hands the current
//! counters to a callback until the search ends.

use std::ops::Range;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use allium_core::{HEADER_SIZE, SearchProgress, Solution, compute, par_scan, write_nonce};

use crate::config::MinerConfig;

/// Hashes per second, zero when no time has elapsed
pub fn hashrate(hashes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        hashes as f64 / secs
    } else {
        0.0
    }
}

/// Counters handed to the progress callback
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub hashes: u64,
    pub elapsed: Duration,
}

impl Tick {
    pub fn hashrate(&self) -> f64 {
        hashrate(self.hashes, self.elapsed)
    }
}

/// Outcome of one search
#[derive(Debug, Clone, Copy)]
pub struct MiningReport {
    /// `None` when the range was exhausted or the search was stopped
    pub solution: Option<Solution>,
    pub hashes: u64,
    pub elapsed: Duration,
}

impl MiningReport {
    pub fn hashrate(&self) -> f64 {
        hashrate(self.hashes, self.elapsed)
    }
}

/// Outcome of a sequential benchmark
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkReport {
    pub hashes: u64,
    pub elapsed: Duration,
}

impl BenchmarkReport {
    pub fn hashrate(&self) -> f64 {
        hashrate(self.hashes, self.elapsed)
    }
}

pub struct Miner {
    config: MinerConfig,
    pool: rayon::ThreadPool,
}

impl Miner {
    pub fn new(config: MinerConfig) -> Result<Self> {
        config.validate().context("Invalid miner configuration")?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("allium-worker-{i}"))
            .build()
            .context("Failed to build worker pool")?;

        log::debug!(
            "Worker pool ready: {} threads, {} nonces per chunk",
            config.threads,
            config.chunk_size
        );
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Search `range` for a nonce meeting the configured difficulty.
    ///
    /// `progress` is reset first; calling [`SearchProgress::stop`] from
    /// another thread ends the search with no solution. `on_tick` runs on
    /// the monitor thread.
    pub fn mine<F>(
        &self,
        header: &[u8; HEADER_SIZE],
        range: Range<u64>,
        progress: &SearchProgress,
        mut on_tick: F,
    ) -> Result<MiningReport>
    where
        F: FnMut(Tick) + Send,
    {
        progress.reset();
        log::info!(
            "Searching nonces {}..{} at difficulty {} on {} threads",
            range.start,
            range.end,
            self.config.difficulty,
            self.config.threads
        );

        let interval = self.config.report_interval();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let start = Instant::now();

        let found = std::thread::scope(|s| {
            s.spawn(move || {
                while let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(interval) {
                    on_tick(Tick {
                        hashes: progress.hashes(),
                        elapsed: start.elapsed(),
                    });
                }
            });

            let found = self.pool.install(|| {
                par_scan(
                    header,
                    self.config.difficulty,
                    range,
                    self.config.chunk_size,
                    progress,
                )
            });
            drop(done_tx);
            found
        });

        let report = MiningReport {
            solution: found.context("Nonce search failed")?,
            hashes: progress.hashes(),
            elapsed: start.elapsed(),
        };

        match &report.solution {
            Some(solution) => log::info!(
                "Found nonce {} after {} hashes",
                solution.nonce,
                report.hashes
            ),
            None if progress.is_stopped() => log::warn!("Search stopped before a solution"),
            None => log::info!("Range exhausted after {} hashes", report.hashes),
        }
        Ok(report)
    }
}

/// Hash `count` consecutive nonces of a zero header on the calling thread
pub fn benchmark(count: u32) -> Result<BenchmarkReport> {
    let mut header = [0u8; HEADER_SIZE];

    let start = Instant::now();
    for nonce in 0..count {
        write_nonce(&mut header, nonce);
        compute(&header).context("Benchmark hash failed")?;
    }

    Ok(BenchmarkReport {
        hashes: count as u64,
        elapsed: start.elapsed(),
    })
}
