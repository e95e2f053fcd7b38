//! Source-strength score
//!
//! The effective source count of an item is
//!
//! ```text
//! effective = direct_documents + summary_documents × DISCOUNT
//! ```
//!
//! where each document path is counted once, at the highest trust class it
//! appears with. The constants below are empirically chosen policy, not
//! derived values; callers override them through configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tunable weight of a summary-derived source (default: 0.5)
pub const DISCOUNT: f64 = 0.5;

/// Tunable "strong" admission threshold in effective sources (default: 3.0)
pub const STRONG_THRESHOLD: f64 = 3.0;

/// Tunable "weak" admission threshold in effective sources (default: 2.0)
pub const WEAK_THRESHOLD: f64 = 2.0;

/// Format a score for reasons and reports
///
/// Always keeps a fractional part so `2` reads as `2.0` and `1.999` is not rounded.
pub fn format_score(value: f64) -> String {
    let rendered = format!("{}", value);
    if value.is_finite() && !rendered.contains('.') {
        format!("{}.0", rendered)
    } else {
        rendered
    }
}

/// Derived corroboration strength for one evidence item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceScore {
    /// Distinct documents with a direct match
    pub direct_document_count: usize,

    /// Distinct lower-trust sources not already counted as direct
    pub summary_derived_count: usize,

    /// `direct + summary × discount`, never negative
    pub effective_score: f64,

    /// Discount that was applied
    pub discount: f64,

    /// Direct document paths, sorted
    pub direct_documents: Vec<String>,

    /// Summary-derived document paths, sorted
    pub summary_documents: Vec<String>,

    /// Human-readable calculation, e.g. `1 direct + (2 × 0.5) = 2.0`
    pub calculation: String,
}

impl SourceScore {
    /// Compute a score from corroborating document paths
    ///
    /// Paths are deduplicated; a path present in both sets counts once as direct.
    pub fn from_documents<D, S>(direct: D, summary: S, discount: f64) -> Self
    where
        D: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
    {
        let discount = if discount.is_finite() { discount.max(0.0) } else { 0.0 };
        let direct: BTreeSet<String> = direct.into_iter().collect();
        let summary: BTreeSet<String> = summary
            .into_iter()
            .filter(|path| !direct.contains(path))
            .collect();

        let direct_count = direct.len();
        let summary_count = summary.len();
        let effective_score = direct_count as f64 + summary_count as f64 * discount;

        Self {
            direct_document_count: direct_count,
            summary_derived_count: summary_count,
            effective_score,
            discount,
            direct_documents: direct.into_iter().collect(),
            summary_documents: summary.into_iter().collect(),
            calculation: format!(
                "{} direct + ({} × {}) = {}",
                direct_count,
                summary_count,
                format_score(discount),
                format_score(effective_score)
            ),
        }
    }

    /// A score with no corroboration
    pub fn zero(discount: f64) -> Self {
        Self::from_documents(Vec::new(), Vec::new(), discount)
    }

    /// Whether the score clears a threshold (inclusive)
    pub fn meets(&self, threshold: f64) -> bool {
        self.effective_score >= threshold
    }

    /// Total distinct corroborating documents
    pub fn total_documents(&self) -> usize {
        self.direct_document_count + self.summary_derived_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_discounted_calculation() {
        let score = SourceScore::from_documents(
            paths(&["a.csv"]),
            paths(&["notes/1.md", "notes/2.md"]),
            DISCOUNT,
        );
        assert_eq!(score.direct_document_count, 1);
        assert_eq!(score.summary_derived_count, 2);
        assert_eq!(score.effective_score, 2.0);
        assert_eq!(score.calculation, "1 direct + (2 × 0.5) = 2.0");
        assert!(score.meets(WEAK_THRESHOLD));
        assert!(!score.meets(STRONG_THRESHOLD));
    }

    #[test]
    fn test_duplicate_paths_count_once() {
        let score = SourceScore::from_documents(
            paths(&["a.csv", "a.csv", "b.csv"]),
            paths(&["b.csv", "c.md"]),
            DISCOUNT,
        );
        assert_eq!(score.direct_document_count, 2);
        assert_eq!(score.summary_derived_count, 1);
        assert_eq!(score.effective_score, 2.5);
        assert_eq!(score.direct_documents, paths(&["a.csv", "b.csv"]));
    }

    #[test]
    fn test_zero_score() {
        let score = SourceScore::zero(DISCOUNT);
        assert_eq!(score.effective_score, 0.0);
        assert_eq!(score.total_documents(), 0);
        assert_eq!(score.calculation, "0 direct + (0 × 0.5) = 0.0");
    }

    #[test]
    fn test_negative_discount_is_clamped() {
        let score = SourceScore::from_documents(Vec::new(), paths(&["x.md"]), -1.0);
        assert_eq!(score.effective_score, 0.0);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(2.0), "2.0");
        assert_eq!(format_score(1.999), "1.999");
        assert_eq!(format_score(2.5), "2.5");
    }
}
