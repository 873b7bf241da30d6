//! Error types for the lattice CLI.

use pricer_core::market_data::MarketDataError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::LatticeError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Market snapshot rejected
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Contract rejected
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Valuation failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] LatticeError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more self-checks failed
    #[error("{failed} of {total} checks failed")]
    CheckFailed {
        /// Number of failing checks
        failed: usize,
        /// Number of checks run
        total: usize,
    },
}

impl CliError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
