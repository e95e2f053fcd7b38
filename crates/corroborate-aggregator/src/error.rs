//! Error types for the Aggregator

use corroborate_domain::Category;
use thiserror::Error;

/// Errors that abort aggregation
///
/// Every variant names the offending input so the run can be fixed and
/// repeated; there is no partial-aggregate mode.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Upstream file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Upstream file is not valid structured data
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Path of the file
        path: String,
        /// What went wrong
        message: String,
    },

    /// A record inside an upstream file is malformed
    #[error("Invalid record '{id}' in {path}: {message}")]
    InvalidRecord {
        /// Path of the file
        path: String,
        /// Record id, or its position when no id is present
        id: String,
        /// What went wrong
        message: String,
    },

    /// The same id was produced by two different categories
    #[error("Evidence id '{id}' produced by both {first} ({first_origin}) and {second} ({second_origin})")]
    IdCollision {
        /// The colliding id
        id: String,
        /// Category that produced it first
        first: Category,
        /// File that produced it first
        first_origin: String,
        /// Category that produced it again
        second: Category,
        /// File that produced it again
        second_origin: String,
    },

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AggregateError {
    pub(crate) fn parse(path: &str, message: impl Into<String>) -> Self {
        AggregateError::Parse {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_record(path: &str, id: impl Into<String>, message: impl Into<String>) -> Self {
        AggregateError::InvalidRecord {
            path: path.to_string(),
            id: id.into(),
            message: message.into(),
        }
    }
}
