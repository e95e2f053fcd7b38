//! Run report: per-item results folded into summary counts

use crate::config::GatekeeperConfig;
use crate::structural::{self, DEFECT_SEPARATOR, STRUCTURAL_PREFIX};
use crate::GatekeeperError;
use corroborate_aggregator::Overwrite;
use corroborate_domain::{Category, ClassificationResult, Decision, EvidenceItem, Rule, Tier};
use serde::Serialize;
use std::collections::BTreeMap;

/// Scoring and policy settings the run used
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicySnapshot {
    /// Summary-derived discount
    pub discount: f64,
    /// Strong threshold
    pub strong_threshold: f64,
    /// Weak threshold
    pub weak_threshold: f64,
    /// Path markers for summary-derived documents
    pub summary_path_markers: Vec<String>,
    /// Names of the policy rules applied
    pub policy_rules: Vec<String>,
}

impl PolicySnapshot {
    fn from_config(config: &GatekeeperConfig) -> Self {
        Self {
            discount: config.scoring.discount,
            strong_threshold: config.scoring.strong_threshold,
            weak_threshold: config.scoring.weak_threshold,
            summary_path_markers: config.scoring.summary_path_markers.clone(),
            policy_rules: config.policy.rules.iter().map(|r| r.name.clone()).collect(),
        }
    }
}

/// Short reference to one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    /// Item id
    pub id: String,
    /// Item category
    pub category: Category,
    /// Result reason
    pub reason: String,
}

impl ItemRef {
    fn from_result(result: &ClassificationResult) -> Self {
        Self {
            id: result.id.clone(),
            category: result.category,
            reason: result.reason.clone(),
        }
    }
}

/// Policy rejections, reported even when there are none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyViolations {
    /// Number of violations
    pub count: usize,
    /// The rejected items
    pub items: Vec<ItemRef>,
}

/// Totals for the run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Items classified
    pub total: usize,
    /// Count per decision (every decision present)
    pub by_decision: BTreeMap<String, usize>,
    /// Admitted count per tier (every tier present)
    pub by_tier: BTreeMap<String, usize>,
    /// Count per category
    pub by_category: BTreeMap<String, usize>,
    /// Rejection reason → count
    pub rejection_reasons: BTreeMap<String, usize>,
    /// Policy rejections
    pub policy_violations: PolicyViolations,
    /// Items held for legal review
    pub legal_review: Vec<ItemRef>,
    /// Items assigned a weaker tier than claimed
    pub downgrades: usize,
    /// Records replaced during aggregation
    pub overwrites: Vec<Overwrite>,
}

impl RunSummary {
    /// Count for one decision
    pub fn count(&self, decision: Decision) -> usize {
        self.by_decision.get(decision.as_str()).copied().unwrap_or(0)
    }

    /// Admitted count for one tier
    pub fn tier_count(&self, tier: Tier) -> usize {
        self.by_tier.get(tier.label()).copied().unwrap_or(0)
    }
}

/// A flagged item close to the weak threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearMiss {
    /// Item id
    pub id: String,
    /// Item category
    pub category: Category,
    /// Score reached
    pub effective_score: f64,
    /// Effective sources still needed for tier 3
    pub shortfall: f64,
}

/// Where more corroboration would change the outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gaps {
    /// Flagged items within the near-miss margin of the weak threshold
    pub near_threshold: Vec<NearMiss>,
    /// Rejected ids per category
    pub rejected_by_category: BTreeMap<String, Vec<String>>,
}

/// Acceptance checks for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuccessCriteria {
    /// No item was rejected by a policy rule
    pub policy_violations_zero: bool,
    /// No admitted item carries a structural defect
    pub no_placeholders_admitted: bool,
    /// At least one item reached tier 1
    pub tier1_present: bool,
}

impl SuccessCriteria {
    /// Whether every criterion holds
    pub fn all_met(&self) -> bool {
        self.policy_violations_zero && self.no_placeholders_admitted && self.tier1_present
    }
}

/// Complete output of one classification run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of the run
    pub generated_at: String,
    /// Settings applied
    pub policy: PolicySnapshot,
    /// One result per item, in id order
    pub results: Vec<ClassificationResult>,
    /// Totals
    pub summary: RunSummary,
    /// Near misses and rejections
    pub gaps: Gaps,
    /// Acceptance checks
    pub success_criteria: SuccessCriteria,
}

impl RunReport {
    /// Fold classified items into a report
    pub fn build(
        config: &GatekeeperConfig,
        classified: &[(&EvidenceItem, ClassificationResult)],
        overwrites: &[Overwrite],
    ) -> Self {
        let mut results: Vec<ClassificationResult> = classified.iter().map(|(_, r)| r.clone()).collect();
        results.sort_by(|a, b| a.id.cmp(&b.id));

        let summary = summarize(&results, overwrites);
        let gaps = find_gaps(config, &results);
        let success_criteria = SuccessCriteria {
            policy_violations_zero: summary.policy_violations.count == 0,
            no_placeholders_admitted: classified
                .iter()
                .filter(|(_, r)| r.is_admitted())
                .all(|(item, _)| structural::defects(item).is_empty()),
            tier1_present: summary.tier_count(Tier::One) > 0,
        };

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            policy: PolicySnapshot::from_config(config),
            results,
            summary,
            gaps,
            success_criteria,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, GatekeeperError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn summarize(results: &[ClassificationResult], overwrites: &[Overwrite]) -> RunSummary {
    let mut by_decision: BTreeMap<String, usize> =
        Decision::ALL.iter().map(|d| (d.as_str().to_string(), 0)).collect();
    let mut by_tier: BTreeMap<String, usize> = Tier::ALL.iter().map(|t| (t.label().to_string(), 0)).collect();
    let mut by_category = BTreeMap::new();
    let mut rejection_reasons = BTreeMap::new();
    let mut policy_violations = PolicyViolations::default();
    let mut legal_review = Vec::new();
    let mut downgrades = 0;

    for result in results {
        *by_decision.entry(result.decision.as_str().to_string()).or_insert(0) += 1;
        *by_category.entry(result.category.as_str().to_string()).or_insert(0) += 1;

        if let (Decision::Admitted, Some(tier)) = (result.decision, result.assigned_tier) {
            *by_tier.entry(tier.label().to_string()).or_insert(0) += 1;
        }
        if let Some(tier) = result.assigned_tier {
            if tier.is_downgrade_from(result.claimed_tier) {
                downgrades += 1;
            }
        }
        if result.decision == Decision::Rejected {
            for key in rejection_keys(result) {
                *rejection_reasons.entry(key).or_insert(0) += 1;
            }
        }
        if result.rule == Rule::Policy {
            policy_violations.items.push(ItemRef::from_result(result));
        }
        if result.legal_review {
            legal_review.push(ItemRef::from_result(result));
        }
    }
    policy_violations.count = policy_violations.items.len();

    RunSummary {
        total: results.len(),
        by_decision,
        by_tier,
        by_category,
        rejection_reasons,
        policy_violations,
        legal_review,
        downgrades,
        overwrites: overwrites.to_vec(),
    }
}

/// Structural rejections count once per defect; others once per reason
fn rejection_keys(result: &ClassificationResult) -> Vec<String> {
    match result.reason.strip_prefix(STRUCTURAL_PREFIX) {
        Some(defects) => defects.split(DEFECT_SEPARATOR).map(str::to_string).collect(),
        None => vec![result.reason.clone()],
    }
}

fn find_gaps(config: &GatekeeperConfig, results: &[ClassificationResult]) -> Gaps {
    let weak = config.scoring.weak_threshold;
    let floor = weak - config.scoring.near_miss_margin;

    let near_threshold = results
        .iter()
        .filter(|r| r.decision == Decision::Flagged && r.rule == Rule::Insufficient)
        .filter_map(|r| {
            let score = r.effective_score()?;
            (score >= floor && score < weak).then(|| NearMiss {
                id: r.id.clone(),
                category: r.category,
                effective_score: score,
                shortfall: weak - score,
            })
        })
        .collect();

    let mut rejected_by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for result in results.iter().filter(|r| r.decision == Decision::Rejected) {
        rejected_by_category
            .entry(result.category.as_str().to_string())
            .or_default()
            .push(result.id.clone());
    }

    Gaps {
        near_threshold,
        rejected_by_category,
    }
}
