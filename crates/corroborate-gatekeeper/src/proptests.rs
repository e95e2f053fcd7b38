//! Property-based tests for scoring and classification

#[cfg(test)]
mod tests {
    use crate::{CorpusIndex, Gatekeeper, ScoringConfig, SourceScorer};
    use corroborate_domain::{
        CorpusMatch, Decision, EntityLinkPayload, EvidenceItem, Payload, SourceClass, TermType, Tier,
    };
    use proptest::prelude::*;

    const NAME: &str = "Acme Holdings";

    fn item() -> EvidenceItem {
        EvidenceItem::new(
            "E-1",
            Payload::EntityLink(EntityLinkPayload {
                entity_name: NAME.to_string(),
                ..Default::default()
            }),
        )
    }

    fn matches() -> impl Strategy<Value = Vec<CorpusMatch>> {
        prop::collection::vec(("[a-h]{1,2}\\.md", any::<bool>()), 0..12).prop_map(|docs| {
            docs.into_iter()
                .map(|(path, summary)| {
                    let class = if summary { SourceClass::SummaryDerived } else { SourceClass::Direct };
                    CorpusMatch::new(NAME, TermType::Name, path, 1, "").with_source_class(class)
                })
                .collect()
        })
    }

    proptest! {
        /// Property: adding a match never lowers the score
        #[test]
        fn test_score_monotone_in_matches(base in matches(), extra in matches()) {
            let scorer = SourceScorer::new(&ScoringConfig::default());
            let before = scorer.score(&item(), &CorpusIndex::new(base.clone()));

            let mut more = base;
            more.extend(extra);
            let after = scorer.score(&item(), &CorpusIndex::new(more));

            prop_assert!(after.effective_score >= before.effective_score);
        }

        /// Property: identical inputs classify identically
        #[test]
        fn test_classification_idempotent(docs in matches()) {
            let gatekeeper = Gatekeeper::default_config();
            let index = CorpusIndex::new(docs);
            prop_assert_eq!(gatekeeper.classify(&item(), &index), gatekeeper.classify(&item(), &index));
        }

        /// Property: the tier follows the thresholds with inclusive bounds
        #[test]
        fn test_tier_matches_thresholds(docs in matches()) {
            let gatekeeper = Gatekeeper::default_config();
            let result = gatekeeper.classify(&item(), &CorpusIndex::new(docs));
            let score = result.effective_score().unwrap_or(0.0);

            let expected = if score >= 3.0 {
                Some(Tier::Two)
            } else if score >= 2.0 {
                Some(Tier::Three)
            } else {
                None
            };
            prop_assert_eq!(result.assigned_tier, expected);
            prop_assert_eq!(result.decision == Decision::Admitted, expected.is_some());
            prop_assert!(result.reason.contains(&result.score.as_ref().map(|s| s.calculation.clone()).unwrap_or_default()));
        }
    }
}
