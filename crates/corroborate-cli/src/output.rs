//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use corroborate_aggregator::{CorpusMapping, TermLists};
use corroborate_domain::{format_score, Category, ClassificationResult, Decision, Tier};
use corroborate_gatekeeper::RunReport;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest reason shown in a table cell.
const REASON_WIDTH: usize = 72;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a run report.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(report.to_json_pretty()?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    /// Format term lists.
    pub fn format_terms(&self, terms: &TermLists) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(terms.to_json_pretty()?),
            OutputFormat::Table => {
                let stats = &terms.stats;
                let mut builder = Builder::default();
                builder.push_record(["Term Type", "Count"]);
                for (name, count) in [
                    ("wallet_addresses", stats.total_wallet_addresses),
                    ("entity_names", stats.total_entity_names),
                    ("keywords", stats.total_keywords),
                    ("amounts", stats.total_amounts),
                    ("platforms", stats.total_platforms),
                    ("urls", stats.total_urls),
                ] {
                    builder.push_record([name.to_string(), count.to_string()]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format a corpus mapping.
    pub fn format_mapping(&self, mapping: &CorpusMapping) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(mapping.to_json_pretty()?),
            OutputFormat::Table => {
                if mapping.terms.is_empty() {
                    return Ok(self.warning("No terms matched the corpus."));
                }
                let mut builder = Builder::default();
                builder.push_record(["Term", "Type", "Matches", "Files"]);
                for (term, entry) in &mapping.terms {
                    builder.push_record([
                        truncate(term, 48),
                        entry.term_type.to_string(),
                        entry.match_count.to_string(),
                        entry.unique_files.to_string(),
                    ]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    fn format_report_table(&self, report: &RunReport) -> String {
        if report.results.is_empty() {
            return self.warning("No evidence items found.");
        }

        let mut results = Builder::default();
        results.push_record(["ID", "Category", "Decision", "Tier", "Score", "Reason"]);
        for result in &report.results {
            results.push_record([
                result.id.clone(),
                result.category.to_string(),
                self.decision(result),
                result
                    .assigned_tier
                    .map(|t| t.number().to_string())
                    .unwrap_or_else(|| "-".to_string()),
                result
                    .effective_score()
                    .map(format_score)
                    .unwrap_or_else(|| "-".to_string()),
                truncate(&result.reason, REASON_WIDTH),
            ]);
        }

        let summary = &report.summary;
        let mut totals = Builder::default();
        totals.push_record(["Category", "Admitted", "Flagged", "Rejected"]);
        for category in Category::ALL {
            let count = |decision: Decision| {
                report
                    .results
                    .iter()
                    .filter(|r| r.category == category && r.decision == decision)
                    .count()
                    .to_string()
            };
            totals.push_record([
                category.to_string(),
                count(Decision::Admitted),
                count(Decision::Flagged),
                count(Decision::Rejected),
            ]);
        }
        totals.push_record([
            "total".to_string(),
            summary.count(Decision::Admitted).to_string(),
            summary.count(Decision::Flagged).to_string(),
            summary.count(Decision::Rejected).to_string(),
        ]);

        let tiers = Tier::ALL
            .iter()
            .map(|t| format!("tier {}: {}", t.number(), summary.tier_count(*t)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = vec![Self::render(results), Self::render(totals), self.info(&tiers)];

        let violations = &summary.policy_violations;
        if violations.count == 0 {
            out.push(self.success("Policy violations: 0"));
        } else {
            out.push(self.error(&format!("Policy violations: {}", violations.count)));
        }
        if !summary.legal_review.is_empty() {
            out.push(self.warning(&format!(
                "Held for legal review: {}",
                summary.legal_review.len()
            )));
        }
        if !report.gaps.near_threshold.is_empty() {
            out.push(self.info(&format!(
                "Near the weak threshold: {}",
                report.gaps.near_threshold.len()
            )));
        }
        if report.success_criteria.all_met() {
            out.push(self.success("All success criteria met"));
        } else {
            out.push(self.warning("Success criteria not met"));
        }
        out.join("\n")
    }

    fn decision(&self, result: &ClassificationResult) -> String {
        let label = result.decision.as_str();
        match result.decision {
            Decision::Admitted => self.colorize(label, "green"),
            Decision::Flagged => self.colorize(label, "yellow"),
            Decision::Rejected => self.colorize(label, "red"),
        }
    }

    fn render(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
