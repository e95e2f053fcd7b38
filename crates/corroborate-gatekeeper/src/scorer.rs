//! Source-strength calculation

use crate::config::ScoringConfig;
use corroborate_domain::traits::CorpusLookup;
use corroborate_domain::{EvidenceItem, SourceClass, SourceScore};
use std::collections::BTreeSet;
use tracing::debug;

/// Computes the effective source count of an evidence item
///
/// Every key fact is looked up; the matched documents are deduplicated by
/// path and split into direct and summary-derived sets. A path counts as
/// summary-derived only when none of its matches is direct.
#[derive(Debug, Clone)]
pub struct SourceScorer {
    discount: f64,
    summary_markers: Vec<String>,
}

impl SourceScorer {
    /// Create a scorer from the scoring policy
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            discount: config.discount,
            summary_markers: config
                .summary_path_markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Score one item against the lookup
    pub fn score<L: CorpusLookup + ?Sized>(&self, item: &EvidenceItem, lookup: &L) -> SourceScore {
        let mut direct = BTreeSet::new();
        let mut summary = BTreeSet::new();

        for fact in item.key_facts() {
            for m in lookup.matches_for(&fact) {
                if self.classify(m.source_class, &m.document_path) == SourceClass::Direct {
                    direct.insert(m.document_path.clone());
                } else {
                    summary.insert(m.document_path.clone());
                }
            }
        }

        let score = SourceScore::from_documents(direct, summary, self.discount);
        debug!("Scored {}: {}", item.id, score.calculation);
        score
    }

    /// Trust class of a match: declared by the search, or inferred from its path
    pub fn classify(&self, declared: SourceClass, document_path: &str) -> SourceClass {
        if declared == SourceClass::SummaryDerived {
            return SourceClass::SummaryDerived;
        }
        let path = document_path.to_lowercase();
        if self.summary_markers.iter().any(|marker| path.contains(marker.as_str())) {
            SourceClass::SummaryDerived
        } else {
            SourceClass::Direct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CorpusIndex;
    use corroborate_domain::{CorpusMatch, EntityLinkPayload, Payload, TermType};

    fn entity(name: &str) -> EvidenceItem {
        EvidenceItem::new(
            "E-1",
            Payload::EntityLink(EntityLinkPayload {
                entity_name: name.to_string(),
                ..Default::default()
            }),
        )
    }

    fn name_hit(path: &str) -> CorpusMatch {
        CorpusMatch::new("Acme Holdings", TermType::Name, path, 1, "")
    }

    #[test]
    fn test_direct_and_summary_split() {
        let scorer = SourceScorer::new(&ScoringConfig::default());
        let index = CorpusIndex::new(vec![
            name_hit("corpus/filing.pdf.txt"),
            name_hit("corpus/ShadowLens/brief.md"),
            name_hit("corpus/other.md").with_source_class(SourceClass::SummaryDerived),
        ]);
        let score = scorer.score(&entity("Acme Holdings"), &index);
        assert_eq!(score.direct_document_count, 1);
        assert_eq!(score.summary_derived_count, 2);
        assert_eq!(score.effective_score, 2.0);
    }

    #[test]
    fn test_path_counts_once_as_direct() {
        let scorer = SourceScorer::new(&ScoringConfig::default());
        let index = CorpusIndex::new(vec![
            name_hit("corpus/a.md"),
            name_hit("corpus/a.md").with_source_class(SourceClass::SummaryDerived),
            name_hit("corpus/a.md"),
        ]);
        let score = scorer.score(&entity("Acme Holdings"), &index);
        assert_eq!(score.direct_document_count, 1);
        assert_eq!(score.summary_derived_count, 0);
        assert_eq!(score.effective_score, 1.0);
    }

    #[test]
    fn test_no_matches_scores_zero() {
        let scorer = SourceScorer::new(&ScoringConfig::default());
        let score = scorer.score(&entity("Nobody"), &CorpusIndex::default());
        assert_eq!(score.effective_score, 0.0);
        assert_eq!(score.calculation, "0 direct + (0 × 0.5) = 0.0");
    }

    #[test]
    fn test_discount_follows_config() {
        let config = ScoringConfig {
            discount: 0.25,
            ..ScoringConfig::default()
        };
        let scorer = SourceScorer::new(&config);
        let index = CorpusIndex::new(vec![name_hit("notebooklm/a.md"), name_hit("notebooklm/b.md")]);
        let score = scorer.score(&entity("Acme Holdings"), &index);
        assert_eq!(score.effective_score, 0.5);
    }
}
