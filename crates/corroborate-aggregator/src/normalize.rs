//! Normalize raw records into typed evidence items
//!
//! The mapping is total: every record yields an item. Missing or mistyped
//! fields become empty values and are caught later by structural checks.

use crate::types::RawRecord;
use corroborate_domain::{
    BlockchainPayload, Category, DocumentSummaryPayload, EntityLinkPayload, EvidenceItem, Payload,
    UrlPatternPayload, WalletAttribution,
};
use serde_json::{Map, Value};

/// Build the evidence item for a record of the given category
pub fn normalize(category: Category, record: &RawRecord) -> EvidenceItem {
    let fields = Fields::new(&record.fields);

    let payload = match category {
        Category::BlockchainTransaction => Payload::BlockchainTransaction(blockchain(&fields)),
        Category::DocumentSummary => Payload::DocumentSummary(DocumentSummaryPayload {
            temporal_anchor: fields.first_str(&["temporal_anchor", "date", "timestamp"]),
            principals: fields.strings("principals"),
            subpoena_target: fields.str("subpoena_target"),
            source_file: fields.str("source_file"),
            source_section: fields.first_str(&["source_section", "section"]),
            summary: fields.first_str(&["summary", "description", "text"]),
        }),
        Category::UrlPattern => Payload::UrlPattern(UrlPatternPayload {
            url: fields.str("url"),
            platform: fields.str("platform"),
            description: fields.first_str(&["description", "pattern"]),
            keywords: fields.strings("keywords"),
        }),
        Category::EntityLink => Payload::EntityLink(EntityLinkPayload {
            entity_name: fields.first_str(&["entity_name", "entity", "name"]),
            principals: fields.strings("principals"),
            relationship: fields.first_str(&["relationship", "link_type"]),
            source_file: fields.str("source_file"),
        }),
    };

    EvidenceItem::new(record.id.clone(), payload).with_claimed_tier(fields.tier())
}

fn blockchain(fields: &Fields<'_>) -> BlockchainPayload {
    let from_wallet = fields.object("from_wallet");
    let to_wallet = fields.object("to_wallet");

    BlockchainPayload {
        tx_hash: fields.str("tx_hash"),
        from_address: address(fields, "from_address", "from_wallet"),
        to_address: address(fields, "to_address", "to_wallet"),
        amount_usd: fields.number("amount_usd"),
        amount_crypto: fields.number("amount_crypto"),
        chain: fields.str("chain"),
        from_wallet: attribution(from_wallet, fields.str("from_entity")),
        to_wallet: attribution(to_wallet, fields.str("to_entity")),
        source_file: fields.str("source_file"),
    }
}

/// Flat address field, else the wallet object's `address`, else a bare wallet string
fn address(fields: &Fields<'_>, key: &str, wallet_key: &str) -> String {
    let flat = fields.str(key);
    if !flat.is_empty() {
        return flat;
    }
    match fields.get(wallet_key) {
        Some(Value::Object(obj)) => text(obj.get("address")),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn attribution(wallet: Option<&Map<String, Value>>, flat_entity: String) -> WalletAttribution {
    match wallet {
        Some(obj) => {
            let entity = text(obj.get("entity"));
            WalletAttribution {
                entity: if entity.is_empty() { flat_entity } else { entity },
                attribution: text(obj.get("attribution")),
            }
        }
        None => WalletAttribution {
            entity: flat_entity,
            attribution: String::new(),
        },
    }
}

/// Field lookup: top level first, then under `metadata`
struct Fields<'a> {
    top: &'a Map<String, Value>,
    metadata: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    fn new(top: &'a Map<String, Value>) -> Self {
        let metadata = match top.get("metadata") {
            Some(Value::Object(obj)) => Some(obj),
            _ => None,
        };
        Self { top, metadata }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.top.get(key) {
            Some(Value::Null) | None => self.metadata.and_then(|m| m.get(key)),
            found => found,
        }
    }

    fn str(&self, key: &str) -> String {
        text(self.get(key))
    }

    fn first_str(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|key| self.str(key))
            .find(|value| !value.is_empty())
            .unwrap_or_default()
    }

    fn number(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => parse_number(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// A list of strings; a single string becomes a one-element list
    fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(values)) => values
                .iter()
                .map(|v| text(Some(v)))
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        }
    }

    fn object(&self, key: &str) -> Option<&'a Map<String, Value>> {
        match self.get(key) {
            Some(Value::Object(obj)) => Some(obj),
            _ => None,
        }
    }

    /// Claimed tier from `tier` or `claimed_tier` (`1`, `"1"`, `"TIER 1"`)
    fn tier(&self) -> Option<u8> {
        let value = self.get("claimed_tier").or_else(|| self.get("tier"))?;
        let n = match value {
            Value::Number(n) => n.as_u64()?,
            Value::String(s) => {
                let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()?
            }
            _ => return None,
        };
        u8::try_from(n).ok().filter(|t| (1..=3).contains(t))
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Parse `1,234.50`, `$1,234` or `0.5 ETH` style amounts
fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .split_whitespace()
        .next()?
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, value: Value) -> RawRecord {
        match value {
            Value::Object(fields) => RawRecord {
                id: id.to_string(),
                fields,
            },
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_blockchain_with_wallet_objects() {
        let raw = record(
            "TIER1-BTC-0001",
            json!({
                "tier": 1,
                "tx_hash": "0xfeed",
                "from_wallet": {"address": "0xAAA", "entity": "Acme", "attribution": "known"},
                "to_wallet": {"address": "0xBBB", "entity": "unknown", "attribution": "unknown"},
                "amount_crypto": "1.5",
                "amount_usd": 4200.5,
                "chain": "ETH",
                "source_file": "transfers.csv"
            }),
        );
        let item = normalize(Category::BlockchainTransaction, &raw);
        assert_eq!(item.claimed_tier, Some(1));

        let Payload::BlockchainTransaction(p) = item.payload else {
            panic!("expected blockchain payload");
        };
        assert_eq!(p.from_address, "0xAAA");
        assert_eq!(p.to_address, "0xBBB");
        assert_eq!(p.amount_crypto, 1.5);
        assert_eq!(p.amount_usd, 4200.5);
        assert_eq!(p.from_wallet.entity, "Acme");
        assert_eq!(p.from_wallet.attribution, "known");
    }

    #[test]
    fn test_blockchain_flat_fields_and_metadata() {
        let raw = record(
            "BC-2",
            json!({
                "tx_hash": "0xbeef",
                "metadata": {"from_address": "0xCCC", "amount_usd": "1,250.00", "from_entity": "Jane"}
            }),
        );
        let Payload::BlockchainTransaction(p) = normalize(Category::BlockchainTransaction, &raw).payload else {
            panic!("expected blockchain payload");
        };
        assert_eq!(p.from_address, "0xCCC");
        assert_eq!(p.amount_usd, 1250.0);
        assert_eq!(p.from_wallet.entity, "Jane");
        assert!(p.to_address.is_empty());
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let raw = record("S-1", json!({}));
        let item = normalize(Category::DocumentSummary, &raw);
        assert_eq!(item.claimed_tier, None);
        assert_eq!(item.payload, Payload::DocumentSummary(DocumentSummaryPayload::default()));
    }

    #[test]
    fn test_mistyped_fields_do_not_fail() {
        let raw = record("BC-3", json!({"amount_usd": "n/a", "tx_hash": ["x"], "tier": "high"}));
        let item = normalize(Category::BlockchainTransaction, &raw);
        assert_eq!(item.claimed_tier, None);
        let Payload::BlockchainTransaction(p) = item.payload else {
            panic!("expected blockchain payload");
        };
        assert_eq!(p.amount_usd, 0.0);
        assert!(p.tx_hash.is_empty());
    }

    #[test]
    fn test_summary_principals_and_tier_label() {
        let raw = record(
            "S-2",
            json!({
                "tier": "TIER 2",
                "date": "2021-03-04",
                "principals": ["J. Doe", "", "R. Roe"],
                "subpoena_target": "Bank records",
                "source_file": "summary.md"
            }),
        );
        let item = normalize(Category::DocumentSummary, &raw);
        assert_eq!(item.claimed_tier, Some(2));
        let Payload::DocumentSummary(p) = item.payload else {
            panic!("expected summary payload");
        };
        assert_eq!(p.temporal_anchor, "2021-03-04");
        assert_eq!(p.principals, vec!["J. Doe", "R. Roe"]);
    }

    #[test]
    fn test_entity_and_url_records() {
        let entity = normalize(
            Category::EntityLink,
            &record("E-1", json!({"entity": "Acme Holdings", "principals": "J. Doe"})),
        );
        let Payload::EntityLink(p) = entity.payload else {
            panic!("expected entity payload");
        };
        assert_eq!(p.entity_name, "Acme Holdings");
        assert_eq!(p.principals, vec!["J. Doe"]);

        let url = normalize(
            Category::UrlPattern,
            &record("U-1", json!({"url": " https://example.com/x ", "keywords": ["heal"]})),
        );
        let Payload::UrlPattern(p) = url.payload else {
            panic!("expected url payload");
        };
        assert_eq!(p.url, "https://example.com/x");
        assert_eq!(p.keywords, vec!["heal"]);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("$1,234.56"), Some(1234.56));
        assert_eq!(parse_number("0.5 ETH"), Some(0.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }
}
