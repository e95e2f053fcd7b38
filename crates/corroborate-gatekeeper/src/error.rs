//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while setting up or running classification
///
/// Per-item problems are never errors; they become Rejected or Flagged results.
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A policy pattern failed to compile
    #[error("Invalid pattern '{pattern}' in policy rule '{rule}': {source}")]
    Pattern {
        /// Rule name
        rule: String,
        /// The offending pattern
        pattern: String,
        /// Underlying error
        #[source]
        source: regex::Error,
    },

    /// Report serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
