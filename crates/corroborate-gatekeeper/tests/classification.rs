//! End-to-end classification: extraction files and corpus mapping on disk

use corroborate_aggregator::{Aggregator, AggregatorConfig, CorpusMapping};
use corroborate_domain::{Decision, Rule, Tier};
use corroborate_gatekeeper::{CorpusIndex, Gatekeeper, GatekeeperConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WALLET: &str = "0x2222222222222222222222222222222222222222";

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn fixtures(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf, std::path::PathBuf) {
    let blockchain = write(
        dir,
        "blockchain.json",
        &format!(
            r#"{{"evidence_items": {{
                "BC-1": {{"tier": 1, "tx_hash": "0xaaa", "from_wallet": {{"address": "{WALLET}", "entity": "Acme", "attribution": "suspected"}}, "amount_usd": 900, "amount_crypto": 0.3}},
                "BC-2": {{"tier": 1, "tx_hash": "0xbbb", "to_address": "0x3333", "amount_usd": 0, "amount_crypto": 4.0}}
            }}}}"#
        ),
    );
    let entities = write(
        dir,
        "entities.json",
        r#"[{"evidence_id": "E-1", "entity_name": "Roe Partners", "tier": 3}]"#,
    );
    let mapping = write(
        dir,
        "mapping.json",
        &format!(
            r#"{{
                "{WALLET}": {{"term_type": "wallet_addresses", "matches": [
                    {{"file": "corpus/bank.csv", "line": 4, "context": "", "match_type": "exact"}},
                    {{"file": "corpus/chat.txt", "line": 9, "context": "", "match_type": "exact"}},
                    {{"file": "corpus/email.eml", "line": 2, "context": "", "match_type": "exact"}}
                ]}},
                "Roe Partners": {{"term_type": "entity_names", "matches": [
                    {{"file": "corpus/filing.txt", "line": 1, "context": "", "match_type": "fuzzy"}},
                    {{"file": "notebooklm/a.md", "line": 1, "context": "", "match_type": "fuzzy"}},
                    {{"file": "notebooklm/b.md", "line": 1, "context": "", "match_type": "fuzzy"}}
                ]}},
                "_summary": {{"total_matches": 6}}
            }}"#
        ),
    );
    (blockchain, entities, mapping)
}

fn run(dir: &Path) -> corroborate_gatekeeper::RunReport {
    let (blockchain, entities, mapping) = fixtures(dir);
    let aggregation = Aggregator::new(AggregatorConfig::default())
        .aggregate_files(&[
            (corroborate_domain::Category::BlockchainTransaction, blockchain),
            (corroborate_domain::Category::EntityLink, entities),
        ])
        .unwrap();
    let index = CorpusIndex::new(CorpusMapping::load(&mapping).unwrap().matches());
    Gatekeeper::new(GatekeeperConfig::default())
        .unwrap()
        .run(aggregation.items.values(), &index, &aggregation.overwrites)
}

#[test]
fn test_full_run_from_files() {
    let dir = TempDir::new().unwrap();
    let report = run(dir.path());

    let by_id = |id: &str| report.results.iter().find(|r| r.id == id).unwrap();

    let proof = by_id("BC-1");
    assert_eq!(proof.decision, Decision::Admitted);
    assert_eq!(proof.assigned_tier, Some(Tier::One));

    let placeholder = by_id("BC-2");
    assert_eq!(placeholder.decision, Decision::Rejected);
    assert_eq!(placeholder.rule, Rule::Structural);
    assert!(placeholder.reason.contains("amount_usd=0 (placeholder)"));

    let inferred = by_id("E-1");
    assert_eq!(inferred.assigned_tier, Some(Tier::Three));
    assert!(inferred.reason.contains("1 direct + (2 × 0.5) = 2.0"));

    assert_eq!(report.summary.total, 3);
    assert!(report.success_criteria.tier1_present);
    assert!(report.success_criteria.policy_violations_zero);
    assert!(report.success_criteria.all_met());
}

#[test]
fn test_repeated_runs_match() {
    let dir = TempDir::new().unwrap();
    let first = run(dir.path());
    let second = run(dir.path());
    assert_eq!(first.results, second.results);
    assert_eq!(first.summary, second.summary);
}
