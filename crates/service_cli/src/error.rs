//! Error types for the strategy-lab CLI.

use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::analytics::CapmError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Strategy file could not be parsed
    #[error("Invalid strategy file {path}: {message}")]
    StrategyFile {
        /// File path
        path: String,
        /// Parser message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pricing or analytics error
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<AnalyticalError> for CliError {
    fn from(err: AnalyticalError) -> Self {
        CliError::Pricing(err.into())
    }
}

impl From<InstrumentError> for CliError {
    fn from(err: InstrumentError) -> Self {
        CliError::Pricing(err.into())
    }
}

impl From<CapmError> for CliError {
    fn from(err: CapmError) -> Self {
        CliError::Pricing(err.into())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
