//! Trait definitions for external interactions
//!
//! These traits define the boundary between the classification core and the
//! document search collaborator. Implementations live in other crates.

use crate::{CorpusMatch, KeyFact};

/// Read-only lookup of corpus matches for a key fact
///
/// Implemented by the gatekeeper's in-memory index. Matching semantics are
/// per fact kind: exact for addresses and URLs, case-insensitive substring
/// for names, numeric pattern for amounts.
pub trait CorpusLookup {
    /// All matches corroborating `fact`, in any order
    fn matches_for(&self, fact: &KeyFact) -> Vec<&CorpusMatch>;

    /// Number of matches held
    fn len(&self) -> usize;

    /// Whether the lookup holds no matches
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
