//! Error types for the Allium pipeline and its calling layers

use core::fmt;

use thiserror::Error;

/// The six stages of the Allium chain, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Blake,
    Keccak,
    Lyra2,
    CubeHash,
    Skein,
    Groestl,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 6] = [
        Stage::Blake,
        Stage::Keccak,
        Stage::Lyra2,
        Stage::CubeHash,
        Stage::Skein,
        Stage::Groestl,
    ];

    /// Human-readable primitive name
    pub fn name(self) -> &'static str {
        match self {
            Stage::Blake => "BLAKE-256",
            Stage::Keccak => "Keccak-256",
            Stage::Lyra2 => "Lyra2",
            Stage::CubeHash => "CubeHash-256",
            Stage::Skein => "Skein-256",
            Stage::Groestl => "Groestl-256",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlliumError {
    #[error("invalid header length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid Lyra2 parameters: {0}")]
    InvalidLyra2Params(&'static str),

    #[error("Lyra2 inputs must be whole 64-bit words (password {password} bytes, salt {salt} bytes)")]
    Lyra2InputAlignment { password: usize, salt: usize },

    #[error("{stage} produced {actual} bytes, expected {expected}")]
    OutputSize {
        stage: Stage,
        expected: usize,
        actual: usize,
    },

    #[error("invalid nonce range {start}..{end}")]
    InvalidNonceRange { start: u64, end: u64 },
}

pub type Result<T> = core::result::Result<T, AlliumError>;
