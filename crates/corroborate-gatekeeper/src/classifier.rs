//! Tier classification

use crate::config::GatekeeperConfig;
use crate::policy::{PolicyGuard, PolicyOutcome};
use crate::report::RunReport;
use crate::scorer::SourceScorer;
use crate::structural;
use crate::GatekeeperError;
use corroborate_aggregator::Overwrite;
use corroborate_domain::traits::CorpusLookup;
use corroborate_domain::{
    format_score, is_placeholder, Category, ClassificationResult, Decision, EvidenceItem, Payload,
    Rule, SourceScore, Tier,
};
use tracing::{debug, info};

/// The Gatekeeper classifies evidence items
///
/// Rules are applied in order and the first that fires decides:
///
/// 1. structural defect → Rejected
/// 2. policy violation → Rejected
/// 3. category-specific tier-1 rule → Admitted(1), or Admitted(2) for a
///    blockchain proof below the strong threshold
/// 4. strong threshold → Admitted(2)
/// 5. weak threshold → Admitted(3)
/// 6. otherwise → Flagged
///
/// An ambiguous policy mention holds the final result for legal review.
#[derive(Debug)]
pub struct Gatekeeper {
    config: GatekeeperConfig,
    scorer: SourceScorer,
    policy: PolicyGuard,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: GatekeeperConfig) -> Result<Self, GatekeeperError> {
        config.validate().map_err(GatekeeperError::Config)?;
        let policy = PolicyGuard::new(&config.policy)?;
        let scorer = SourceScorer::new(&config.scoring);
        Ok(Self {
            config,
            scorer,
            policy,
        })
    }

    /// Create a Gatekeeper with default configuration (no policy rules)
    pub fn default_config() -> Self {
        let config = GatekeeperConfig::default();
        Self {
            scorer: SourceScorer::new(&config.scoring),
            policy: PolicyGuard::empty(),
            config,
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    /// Classify one item
    pub fn classify<L: CorpusLookup + ?Sized>(&self, item: &EvidenceItem, lookup: &L) -> ClassificationResult {
        let result = self.decide(item, lookup);
        debug!(
            "Classified {} ({}): {} [{}]",
            result.id,
            result.category,
            result.decision,
            result.reason
        );
        result
    }

    /// Classify every item and build the run report
    pub fn run<'a, I, L>(&self, items: I, lookup: &L, overwrites: &[Overwrite]) -> RunReport
    where
        I: IntoIterator<Item = &'a EvidenceItem>,
        L: CorpusLookup + ?Sized,
    {
        let classified: Vec<_> = items
            .into_iter()
            .map(|item| (item, self.classify(item, lookup)))
            .collect();
        let report = RunReport::build(&self.config, &classified, overwrites);
        info!(
            "Classified {} items: {} admitted, {} flagged, {} rejected",
            report.summary.total,
            report.summary.count(Decision::Admitted),
            report.summary.count(Decision::Flagged),
            report.summary.count(Decision::Rejected),
        );
        report
    }

    fn decide<L: CorpusLookup + ?Sized>(&self, item: &EvidenceItem, lookup: &L) -> ClassificationResult {
        // 1. Structural
        let defects = structural::defects(item);
        if !defects.is_empty() {
            return ClassificationResult::rejected(item, Rule::Structural, structural::reason(&defects), None);
        }

        // 2. Policy
        let legal_review = match self.policy.evaluate(item) {
            PolicyOutcome::Violation { rule, pattern } => {
                return ClassificationResult::rejected(
                    item,
                    Rule::Policy,
                    format!(
                        "Policy violation ({}): matched '{}' with no protective context",
                        rule, pattern
                    ),
                    None,
                );
            }
            PolicyOutcome::Ambiguous { rule } => Some(rule),
            PolicyOutcome::Clear => None,
        };

        let score = self.scorer.score(item, lookup);
        let result = self.tier(item, score);

        match legal_review {
            Some(rule) => result.hold_for_legal_review(&format!("'{}' subject mentioned, context ambiguous", rule)),
            None => result,
        }
    }

    /// Tier rules 3-6
    fn tier(&self, item: &EvidenceItem, score: SourceScore) -> ClassificationResult {
        let scoring = &self.config.scoring;
        let strong = format_score(scoring.strong_threshold);
        let weak = format_score(scoring.weak_threshold);

        // 3. Tier-1, category-specific
        match &item.payload {
            Payload::BlockchainTransaction(p) if !is_placeholder(&p.tx_hash) => {
                if score.meets(scoring.strong_threshold) {
                    let reason = format!("Tier 1 proof: tx_hash + {} (>= {})", score.calculation, strong);
                    return ClassificationResult::admitted(item, Tier::One, Rule::Tier1, reason, score);
                }
                let reason = format!(
                    "tx_hash present but only {} effective sources (need {}); tier 1 downgraded to tier 2{}",
                    score.calculation,
                    strong,
                    claim_note(item, Tier::Two)
                );
                return ClassificationResult::admitted(item, Tier::Two, Rule::ProofDowngrade, reason, score);
            }
            Payload::DocumentSummary(p)
                if !is_placeholder(&p.temporal_anchor)
                    && !is_placeholder(&p.subpoena_target)
                    && p.principals.iter().any(|name| !is_placeholder(name)) =>
            {
                let reason = format!(
                    "Documentary proof: temporal anchor {}, {} principal(s), subpoena target '{}'; {}",
                    p.temporal_anchor.trim(),
                    p.principals.iter().filter(|name| !is_placeholder(name)).count(),
                    p.subpoena_target.trim(),
                    score.calculation
                );
                return ClassificationResult::admitted(item, Tier::One, Rule::Tier1, reason, score);
            }
            _ => {}
        }

        // 4. Tier-2
        if score.meets(scoring.strong_threshold) {
            let reason = format!(
                "{} (>= {} strong threshold){}",
                score.calculation,
                strong,
                claim_note(item, Tier::Two)
            );
            return ClassificationResult::admitted(item, Tier::Two, Rule::Tier2, reason, score);
        }

        // 5. Tier-3
        if score.meets(scoring.weak_threshold) {
            let reason = format!(
                "{} (>= {} but < {}): {}{}",
                score.calculation,
                weak,
                strong,
                tier3_meaning(item.category()),
                claim_note(item, Tier::Three)
            );
            return ClassificationResult::admitted(item, Tier::Three, Rule::Tier3, reason, score);
        }

        // 6. Fallback
        let claimed = match item.claimed_tier {
            Some(tier) => format!("; claimed tier {} not supported", tier),
            None => String::new(),
        };
        let reason = format!(
            "{} (< {} weak threshold): insufficient corroboration, manual review{}",
            score.calculation, weak, claimed
        );
        ClassificationResult::flagged(item, Rule::Insufficient, reason, score)
    }
}

/// What a tier-3 admission means for each category
fn tier3_meaning(category: Category) -> &'static str {
    match category {
        Category::UrlPattern => "pattern evidence, needs further legal review",
        Category::EntityLink => "inference, needs context analysis",
        Category::BlockchainTransaction | Category::DocumentSummary => "investigative lead, needs more sources",
    }
}

fn claim_note(item: &EvidenceItem, assigned: Tier) -> String {
    match item.claimed_tier {
        Some(claimed) if assigned.is_downgrade_from(Some(claimed)) => {
            format!("; downgraded from claimed tier {}", claimed)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PolicyConfig, PolicyRule};
    use crate::CorpusIndex;
    use corroborate_domain::{
        BlockchainPayload, CorpusMatch, DocumentSummaryPayload, EntityLinkPayload,
        SourceClass, TermType, UrlPatternPayload,
    };

    const WALLET: &str = "0x1111111111111111111111111111111111111111";

    fn transfer(tx_hash: &str) -> EvidenceItem {
        EvidenceItem::new(
            "BC-1",
            Payload::BlockchainTransaction(BlockchainPayload {
                tx_hash: tx_hash.to_string(),
                from_address: WALLET.to_string(),
                amount_usd: 5000.0,
                amount_crypto: 2.0,
                chain: "ETH".to_string(),
                source_file: "exports/transfers.csv".to_string(),
                ..Default::default()
            }),
        )
    }

    fn wallet_hits(paths: &[&str]) -> CorpusIndex {
        CorpusIndex::new(
            paths
                .iter()
                .map(|p| CorpusMatch::new(WALLET, TermType::Address, *p, 1, ""))
                .collect(),
        )
    }

    fn entity() -> EvidenceItem {
        EvidenceItem::new(
            "E-1",
            Payload::EntityLink(EntityLinkPayload {
                entity_name: "Acme Holdings".to_string(),
                ..Default::default()
            }),
        )
    }

    fn entity_hits(direct: usize, summary: usize) -> CorpusIndex {
        let mut matches = Vec::new();
        for i in 0..direct {
            matches.push(CorpusMatch::new("Acme Holdings", TermType::Name, format!("corpus/d{}.md", i), 1, ""));
        }
        for i in 0..summary {
            matches.push(
                CorpusMatch::new("Acme Holdings", TermType::Name, format!("corpus/s{}.md", i), 1, "")
                    .with_source_class(SourceClass::SummaryDerived),
            );
        }
        CorpusIndex::new(matches)
    }

    #[test]
    fn test_blockchain_proof_with_three_documents_is_tier1() {
        let gatekeeper = Gatekeeper::default_config();
        let index = wallet_hits(&["a.csv", "b.md", "c.md"]);
        let result = gatekeeper.classify(&transfer("0xfeed").with_claimed_tier(Some(1)), &index);

        assert_eq!(result.decision, Decision::Admitted);
        assert_eq!(result.assigned_tier, Some(Tier::One));
        assert_eq!(result.rule, Rule::Tier1);
        assert!(result.reason.contains("3 direct + (0 × 0.5) = 3.0"));
    }

    #[test]
    fn test_blockchain_proof_below_threshold_is_downgraded() {
        let gatekeeper = Gatekeeper::default_config();
        let index = wallet_hits(&["a.csv"]);
        let result = gatekeeper.classify(&transfer("0xfeed").with_claimed_tier(Some(1)), &index);

        assert_eq!(result.decision, Decision::Admitted);
        assert_eq!(result.assigned_tier, Some(Tier::Two));
        assert_eq!(result.rule, Rule::ProofDowngrade);
        assert!(result.reason.contains("tier 1 downgraded to tier 2"));
        assert!(result.reason.contains("downgraded from claimed tier 1"));
        assert!(result.reason.contains("1 direct + (0 × 0.5) = 1.0"));
    }

    #[test]
    fn test_blockchain_without_tx_hash_uses_thresholds() {
        let gatekeeper = Gatekeeper::default_config();
        let result = gatekeeper.classify(&transfer(""), &wallet_hits(&["a.csv", "b.md"]));
        assert_eq!(result.assigned_tier, Some(Tier::Three));
        assert_eq!(result.rule, Rule::Tier3);
    }

    #[test]
    fn test_zero_usd_placeholder_rejected() {
        let gatekeeper = Gatekeeper::default_config();
        let mut item = transfer("0xfeed");
        if let Payload::BlockchainTransaction(p) = &mut item.payload {
            p.amount_usd = 0.0;
        }
        let result = gatekeeper.classify(&item, &wallet_hits(&["a", "b", "c", "d"]));

        assert_eq!(result.decision, Decision::Rejected);
        assert_eq!(result.rule, Rule::Structural);
        assert!(result.reason.contains("amount_usd=0 (placeholder)"));
        assert!(result.score.is_none());
    }

    #[test]
    fn test_discounted_sources_reach_tier3() {
        let gatekeeper = Gatekeeper::default_config();
        let result = gatekeeper.classify(&entity(), &entity_hits(1, 2));

        assert_eq!(result.decision, Decision::Admitted);
        assert_eq!(result.assigned_tier, Some(Tier::Three));
        assert_eq!(result.effective_score(), Some(2.0));
        assert!(result.reason.contains("1 direct + (2 × 0.5) = 2.0"));
        assert!(result.reason.contains("inference, needs context analysis"));
    }

    #[test]
    fn test_threshold_boundaries() {
        let gatekeeper = Gatekeeper::default_config();

        let at_strong = gatekeeper.classify(&entity(), &entity_hits(3, 0));
        assert_eq!(at_strong.assigned_tier, Some(Tier::Two));
        assert_eq!(at_strong.rule, Rule::Tier2);

        let at_weak = gatekeeper.classify(&entity(), &entity_hits(2, 0));
        assert_eq!(at_weak.assigned_tier, Some(Tier::Three));

        let below = gatekeeper.classify(&entity(), &entity_hits(1, 1));
        assert_eq!(below.decision, Decision::Flagged);
        assert_eq!(below.assigned_tier, None);
        assert!(below.reason.contains("1.5"));
    }

    #[test]
    fn test_just_below_weak_threshold_is_flagged() {
        let config = GatekeeperConfig {
            scoring: crate::ScoringConfig {
                discount: 0.999,
                ..Default::default()
            },
            ..Default::default()
        };
        let gatekeeper = Gatekeeper::new(config).unwrap();
        let result = gatekeeper.classify(&entity(), &entity_hits(1, 1));
        assert_eq!(result.effective_score(), Some(1.999));
        assert_eq!(result.decision, Decision::Flagged);
        assert!(result.reason.contains("1.999"));
    }

    #[test]
    fn test_document_summary_complete_fields_is_tier1() {
        let gatekeeper = Gatekeeper::default_config();
        let item = EvidenceItem::new(
            "S-1",
            Payload::DocumentSummary(DocumentSummaryPayload {
                temporal_anchor: "2021-06-01".to_string(),
                principals: vec!["J. Doe".to_string()],
                subpoena_target: "First Bank account records".to_string(),
                source_file: "shadowlens/summary.md".to_string(),
                ..Default::default()
            }),
        );
        let result = gatekeeper.classify(&item, &CorpusIndex::default());
        assert_eq!(result.assigned_tier, Some(Tier::One));
        assert!(result.reason.contains("Documentary proof"));
        assert!(result.reason.contains("0 direct + (0 × 0.5) = 0.0"));
    }

    #[test]
    fn test_document_summary_missing_subpoena_falls_through() {
        let gatekeeper = Gatekeeper::default_config();
        let item = EvidenceItem::new(
            "S-2",
            Payload::DocumentSummary(DocumentSummaryPayload {
                temporal_anchor: "2021-06-01".to_string(),
                principals: vec!["J. Doe".to_string()],
                source_file: "summary.md".to_string(),
                ..Default::default()
            }),
        )
        .with_claimed_tier(Some(1));
        let result = gatekeeper.classify(&item, &CorpusIndex::default());
        assert_eq!(result.decision, Decision::Flagged);
        assert!(result.reason.contains("claimed tier 1 not supported"));
    }

    #[test]
    fn test_url_pattern_has_no_tier1_path() {
        let gatekeeper = Gatekeeper::default_config();
        let url = "https://example.com/offer";
        let item = EvidenceItem::new(
            "U-1",
            Payload::UrlPattern(UrlPatternPayload {
                url: url.to_string(),
                ..Default::default()
            }),
        )
        .with_claimed_tier(Some(1));
        let index = CorpusIndex::new(vec![
            CorpusMatch::new(url, TermType::Url, "a.md", 1, ""),
            CorpusMatch::new(url, TermType::Url, "b.md", 1, ""),
        ]);
        let result = gatekeeper.classify(&item, &index);
        assert_eq!(result.assigned_tier, Some(Tier::Three));
        assert!(result.reason.contains("needs further legal review"));
        assert!(result.reason.contains("downgraded from claimed tier 1"));
    }

    fn guarded() -> Gatekeeper {
        Gatekeeper::new(GatekeeperConfig {
            policy: PolicyConfig {
                rules: vec![PolicyRule {
                    name: "protected-third-party".to_string(),
                    subject: vec![r"\bacme holdings\b".to_string()],
                    denylist: vec![r"acme holdings.*\bscam\b".to_string()],
                    overrides: vec![r"acme holdings.*victim".to_string()],
                }],
            },
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_policy_violation_rejects_regardless_of_score() {
        let mut item = entity();
        if let Payload::EntityLink(p) = &mut item.payload {
            p.relationship = "runs a scam".to_string();
        }
        let result = guarded().classify(&item, &entity_hits(10, 0));
        assert_eq!(result.decision, Decision::Rejected);
        assert_eq!(result.rule, Rule::Policy);
        assert!(result.reason.contains("protected-third-party"));
    }

    #[test]
    fn test_ambiguous_mention_held_for_legal_review() {
        let result = guarded().classify(&entity(), &entity_hits(3, 0));
        assert_eq!(result.decision, Decision::Flagged);
        assert_eq!(result.rule, Rule::LegalReview);
        assert_eq!(result.assigned_tier, Some(Tier::Two));
        assert!(result.legal_review);
        assert!(result.reason.contains("held for legal review"));
    }

    #[test]
    fn test_protective_context_is_clear() {
        let mut item = entity();
        if let Payload::EntityLink(p) = &mut item.payload {
            p.relationship = "named a scam victim".to_string();
        }
        let result = guarded().classify(&item, &entity_hits(3, 0));
        assert_eq!(result.decision, Decision::Admitted);
        assert!(!result.legal_review);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GatekeeperConfig::default();
        config.scoring.discount = -1.0;
        assert!(matches!(Gatekeeper::new(config), Err(GatekeeperError::Config(_))));
    }
}
