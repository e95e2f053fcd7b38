//! Corroborate Corpus
//!
//! Document search that turns a term list into a corpus mapping: every line
//! of every readable file under the corpus directories is checked against
//! every term, with matching rules chosen by term type.
//!
//! # Example Usage
//!
//! ```no_run
//! use corroborate_aggregator::TermLists;
//! use corroborate_corpus::{CorpusSearcher, SearchConfig};
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let terms = TermLists::load(Path::new("validation_terms.json"))?;
//! let searcher = CorpusSearcher::new(SearchConfig::default())?;
//! let mapping = searcher.search(&terms, &[PathBuf::from("corpus")])?;
//! println!("{}", mapping.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod matcher;
mod searcher;

pub use config::SearchConfig;
pub use error::CorpusError;
pub use matcher::{amount_patterns, TermMatcher};
pub use searcher::CorpusSearcher;
