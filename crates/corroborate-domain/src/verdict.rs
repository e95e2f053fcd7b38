//! Verdict module - the auditable outcome of classification

use crate::{Category, EvidenceItem, SourceScore, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final decision for an evidence item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Admitted at a tier
    Admitted,

    /// Routed to human review
    Flagged,

    /// Structural defect or policy violation
    Rejected,
}

impl Decision {
    /// All decisions, in report order
    pub const ALL: [Decision; 3] = [Decision::Admitted, Decision::Flagged, Decision::Rejected];

    /// Get the decision name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Admitted => "admitted",
            Decision::Flagged => "flagged",
            Decision::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classifier rule that produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Required field missing or placeholder
    Structural,

    /// Safeguard denylist matched without an override
    Policy,

    /// Category tier-1 proof satisfied
    Tier1,

    /// Proof present but tier-1 corroboration short, held at tier 2
    ProofDowngrade,

    /// Strong threshold met
    Tier2,

    /// Weak threshold met
    Tier3,

    /// Below the weak threshold
    Insufficient,

    /// Ambiguous safeguard mention, held for legal review
    LegalReview,
}

/// The verdict for one evidence item
///
/// `reason` is always populated so a reviewer can reconstruct the decision
/// without re-running the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Item identifier
    pub id: String,

    /// Item category
    pub category: Category,

    /// The decision
    pub decision: Decision,

    /// Tier reached, set when admitted and on flags that reached a partial tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_tier: Option<Tier>,

    /// Justification with the calculation or the failing condition
    pub reason: String,

    /// Rule that decided the outcome
    pub rule: Rule,

    /// Tier the extractor claimed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_tier: Option<u8>,

    /// Source score, absent when rejected before scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<SourceScore>,

    /// Whether the item needs legal review before use
    #[serde(default)]
    pub legal_review: bool,
}

impl ClassificationResult {
    /// An admission at `tier`
    pub fn admitted(
        item: &EvidenceItem,
        tier: Tier,
        rule: Rule,
        reason: impl Into<String>,
        score: SourceScore,
    ) -> Self {
        Self::build(item, Decision::Admitted, Some(tier), rule, reason.into(), Some(score))
    }

    /// A flag for manual review
    pub fn flagged(item: &EvidenceItem, rule: Rule, reason: impl Into<String>, score: SourceScore) -> Self {
        Self::build(item, Decision::Flagged, None, rule, reason.into(), Some(score))
    }

    /// A rejection, decided before or independent of scoring
    pub fn rejected(
        item: &EvidenceItem,
        rule: Rule,
        reason: impl Into<String>,
        score: Option<SourceScore>,
    ) -> Self {
        Self::build(item, Decision::Rejected, None, rule, reason.into(), score)
    }

    fn build(
        item: &EvidenceItem,
        decision: Decision,
        assigned_tier: Option<Tier>,
        rule: Rule,
        reason: String,
        score: Option<SourceScore>,
    ) -> Self {
        Self {
            id: item.id.clone(),
            category: item.category(),
            decision,
            assigned_tier,
            reason,
            rule,
            claimed_tier: item.claimed_tier,
            score,
            legal_review: false,
        }
    }

    /// Hold the result for legal review
    ///
    /// An admission becomes a flag that keeps its tier as a partial tier; the
    /// review note is appended to the reason.
    pub fn hold_for_legal_review(mut self, note: &str) -> Self {
        self.legal_review = true;
        if self.decision == Decision::Admitted {
            self.decision = Decision::Flagged;
            self.rule = Rule::LegalReview;
        }
        self.reason = format!("{}; held for legal review: {}", self.reason, note);
        self
    }

    /// Whether the item was admitted
    pub fn is_admitted(&self) -> bool {
        self.decision == Decision::Admitted
    }

    /// The effective score, if the item was scored
    pub fn effective_score(&self) -> Option<f64> {
        self.score.as_ref().map(|s| s.effective_score)
    }
}
