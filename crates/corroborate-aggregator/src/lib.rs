//! Corroborate Aggregator
//!
//! Merges evidence candidates from the upstream extraction passes into one
//! id-keyed collection, and reads and writes the files exchanged with the
//! document search.
//!
//! # Overview
//!
//! Each extraction pass (blockchain CSV extraction, AI document summaries,
//! URL/pattern analysis, entity linkage) writes its own JSON file. The caller
//! tags every file with its [`Category`](corroborate_domain::Category); records
//! are normalized into typed [`EvidenceItem`](corroborate_domain::EvidenceItem)s
//! and merged with explicit collision handling.
//!
//! # Architecture
//!
//! ```text
//! extraction files → parse → normalize → merge → Aggregation
//!                                                    ↓
//!                                   TermLists → document search → CorpusMapping
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use corroborate_aggregator::{Aggregator, AggregatorConfig};
//! use corroborate_domain::Category;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let aggregator = Aggregator::new(AggregatorConfig::default());
//! let aggregation = aggregator.aggregate_files(&[
//!     (Category::BlockchainTransaction, "blockchain_evidence.json"),
//!     (Category::EntityLink, "entity_links.json"),
//! ])?;
//!
//! println!("Items: {}", aggregation.len());
//! println!("Overwrites: {}", aggregation.overwrites.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod config;
mod corpus;
mod error;
mod normalize;
mod parser;
mod terms;
mod types;


pub use aggregator::Aggregator;
pub use config::{AggregatorConfig, CollisionPolicy};
pub use corpus::{CorpusMapping, MappedHit, MappingSummary, TermMapping};
pub use error::AggregateError;
pub use normalize::normalize;
pub use parser::parse_source;
pub use terms::{TermLists, TermStats};
pub use types::{Aggregation, Overwrite, RawRecord, SourceBatch};
