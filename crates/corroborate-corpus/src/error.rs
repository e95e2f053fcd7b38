//! Corpus search error types

use thiserror::Error;

/// Errors that can occur while searching the corpus
///
/// Unreadable individual files are skipped, not reported as errors.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// No corpus directory exists
    #[error("None of the corpus directories exist: {0}")]
    NoCorpus(String),

    /// A search pattern failed to compile
    #[error("Invalid pattern for term '{term}': {source}")]
    Pattern {
        /// The term
        term: String,
        /// Underlying error
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
