//! Protected-party policy safeguard

use crate::config::{PolicyConfig, PolicyRule};
use crate::GatekeeperError;
use corroborate_domain::EvidenceItem;
use regex::{Regex, RegexBuilder};

/// Outcome of the policy check for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// No rule's subject is mentioned, or every mention is in protective context
    Clear,

    /// Subject and denylist matched with no override
    Violation {
        /// Rule that fired
        rule: String,
        /// Denylist pattern that matched
        pattern: String,
    },

    /// Subject mentioned with neither denylist nor override
    Ambiguous {
        /// Rule whose subject was mentioned
        rule: String,
    },
}

impl PolicyOutcome {
    /// Whether the item must be rejected
    pub fn is_violation(&self) -> bool {
        matches!(self, PolicyOutcome::Violation { .. })
    }
}

struct CompiledRule {
    name: String,
    subject: Vec<Regex>,
    denylist: Vec<Regex>,
    overrides: Vec<Regex>,
}

impl CompiledRule {
    fn compile(rule: &PolicyRule) -> Result<Self, GatekeeperError> {
        let compile_all = |patterns: &[String]| -> Result<Vec<Regex>, GatekeeperError> {
            patterns
                .iter()
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(|source| GatekeeperError::Pattern {
                            rule: rule.name.clone(),
                            pattern: pattern.clone(),
                            source,
                        })
                })
                .collect()
        };

        Ok(Self {
            name: rule.name.clone(),
            subject: compile_all(&rule.subject)?,
            denylist: compile_all(&rule.denylist)?,
            overrides: compile_all(&rule.overrides)?,
        })
    }

    fn evaluate(&self, content: &str) -> PolicyOutcome {
        if !self.subject.iter().any(|re| re.is_match(content)) {
            return PolicyOutcome::Clear;
        }
        if self.overrides.iter().any(|re| re.is_match(content)) {
            return PolicyOutcome::Clear;
        }
        match self.denylist.iter().find(|re| re.is_match(content)) {
            Some(re) => PolicyOutcome::Violation {
                rule: self.name.clone(),
                pattern: re.as_str().to_string(),
            },
            None => PolicyOutcome::Ambiguous {
                rule: self.name.clone(),
            },
        }
    }
}

/// Compiled policy rules
///
/// Rules are checked in order against the item's serialized, lowercased
/// content. The first violation wins; otherwise the first ambiguous mention
/// is reported.
pub struct PolicyGuard {
    rules: Vec<CompiledRule>,
}

impl PolicyGuard {
    /// Compile the configured rules
    pub fn new(config: &PolicyConfig) -> Result<Self, GatekeeperError> {
        let rules = config
            .rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// A guard with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of compiled rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate an evidence item
    pub fn evaluate(&self, item: &EvidenceItem) -> PolicyOutcome {
        if self.rules.is_empty() {
            return PolicyOutcome::Clear;
        }
        let content = serde_json::to_string(item)
            .unwrap_or_else(|_| format!("{:?}", item))
            .to_lowercase();
        self.evaluate_text(&content)
    }

    /// Evaluate raw text
    pub fn evaluate_text(&self, content: &str) -> PolicyOutcome {
        let mut ambiguous = None;
        for rule in &self.rules {
            match rule.evaluate(content) {
                PolicyOutcome::Clear => {}
                violation @ PolicyOutcome::Violation { .. } => return violation,
                outcome @ PolicyOutcome::Ambiguous { .. } => {
                    ambiguous.get_or_insert(outcome);
                }
            }
        }
        ambiguous.unwrap_or(PolicyOutcome::Clear)
    }
}

impl std::fmt::Debug for PolicyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyGuard")
            .field("rules", &self.rules.iter().map(|r| r.name.as_str()).collect::<Vec<_>>())
            .finish()
    }
}
