//! Corroborate Gatekeeper
//!
//! Scores evidence items against the document corpus and decides whether
//! each one is admitted, flagged or rejected.
//!
//! The Gatekeeper provides:
//! - Source-strength scoring with a discount for summary-derived documents
//! - Structural checks for missing fields and placeholder values
//! - Protected-party policy safeguards
//! - Tier classification with an auditable reason for every decision
//! - A run report with summary counts, gaps and success criteria
//!
//! # Examples
//!
//! ```no_run
//! use corroborate_gatekeeper::{CorpusIndex, Gatekeeper, GatekeeperConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gatekeeper = Gatekeeper::new(GatekeeperConfig::default())?;
//! let index = CorpusIndex::new(Vec::new());
//!
//! // let result = gatekeeper.classify(&item, &index);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod index;
mod policy;
mod report;
mod scorer;
mod structural;

#[cfg(test)]
mod proptests;

pub use classifier::Gatekeeper;
pub use config::{GatekeeperConfig, PolicyConfig, PolicyRule, ScoringConfig};
pub use error::GatekeeperError;
pub use index::CorpusIndex;
pub use policy::{PolicyGuard, PolicyOutcome};
pub use report::{
    Gaps, ItemRef, NearMiss, PolicySnapshot, PolicyViolations, RunReport, RunSummary,
    SuccessCriteria,
};
pub use scorer::SourceScorer;
pub use structural::defects as structural_defects;
