//! Corroborate Domain Layer
//!
//! This crate contains the value types shared by every stage of the evidence
//! pipeline. It performs no I/O and depends only on `serde` for its derives.
//!
//! ## Key Concepts
//!
//! - **EvidenceItem**: one claimed fact plus its provenance, immutable once aggregated
//! - **CorpusMatch**: a single occurrence of a search term inside the document corpus
//! - **SourceScore**: the discount-weighted count of corroborating documents
//! - **ClassificationResult**: the auditable verdict for one item
//! - **Tier**: confidence bucket (1 = strongest) assigned to admitted evidence
//!
//! ## Architecture
//!
//! ```text
//! Aggregate → Score → Classify → Report
//! ```
//!
//! Infrastructure (file parsing, corpus search, CLI) lives in other crates and
//! talks to this one through plain values and the [`traits::CorpusLookup`] seam.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod corpus;
pub mod evidence;
pub mod score;
pub mod tier;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use category::Category;
pub use corpus::{CorpusMatch, FactKind, KeyFact, SourceClass, TermType};
pub use evidence::{
    is_placeholder, BlockchainPayload, DocumentSummaryPayload, EntityLinkPayload,
    EvidenceItem, Payload, UrlPatternPayload, WalletAttribution,
};
pub use score::{format_score, SourceScore, DISCOUNT, STRONG_THRESHOLD, WEAK_THRESHOLD};
pub use tier::Tier;
pub use verdict::{ClassificationResult, Decision, Rule};
