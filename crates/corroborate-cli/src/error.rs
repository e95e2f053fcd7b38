//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Aggregation error
    #[error(transparent)]
    Aggregate(#[from] corroborate_aggregator::AggregateError),

    /// Classification setup error
    #[error(transparent)]
    Gatekeeper(#[from] corroborate_gatekeeper::GatekeeperError),

    /// Corpus search error
    #[error(transparent)]
    Corpus(#[from] corroborate_corpus::CorpusError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
