//! Error types for the storm report.
//!
//! Library code returns these typed errors; `main.rs` wraps them with
//! `anyhow` context. Problems with individual records are never errors,
//! they are counted in the stage reports instead.

use thiserror::Error;

/// Errors that can occur while reading the storm event file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur while writing report files
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid pipeline configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("year range is inverted: {min} > {max}")]
    InvertedYearRange { min: i32, max: i32 },

    #[error("top-N must be at least 1")]
    ZeroTopN,
}
