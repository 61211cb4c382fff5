//! Miner configuration loaded from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the working directory
pub const LOCAL_CONFIG: &str = "allium.toml";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("thread count must be at least 1")]
    NoThreads,

    #[error("chunk size must be at least 1 nonce")]
    EmptyChunk,

    #[error("difficulty {0} exceeds the 256-bit digest")]
    DifficultyTooHigh(u32),

    #[error("report interval must be at least 1 second")]
    NoReportInterval,
}

/// Settings for the `mine` and `benchmark` commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Worker threads in the search pool
    pub threads: usize,
    /// Required leading zero bits
    pub difficulty: u32,
    /// Nonces handed to a worker at a time
    pub chunk_size: u64,
    /// Seconds between hashrate reports
    pub report_interval_secs: u64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            difficulty: 16,
            chunk_size: 4096,
            report_interval_secs: 2,
        }
    }
}

impl MinerConfig {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. `explicit`, when given (must exist)
    /// 2. ./allium.toml (current directory)
    /// 3. ~/.config/allium/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(user_config) = user_config_path() {
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: MinerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::EmptyChunk);
        }
        if self.difficulty > 256 {
            return Err(ConfigError::DifficultyTooHigh(self.difficulty));
        }
        if self.report_interval_secs == 0 {
            return Err(ConfigError::NoReportInterval);
        }
        Ok(())
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, threads: Option<usize>, difficulty: Option<u32>) -> Self {
        if let Some(threads) = threads {
            self.threads = threads;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self
    }
}

/// `<config dir>/allium/config.toml`, when the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("allium").join("config.toml"))
}
