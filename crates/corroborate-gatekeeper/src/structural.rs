//! Structural checks: required fields and placeholder values

use corroborate_domain::{is_placeholder, EvidenceItem, Payload};

/// Prefix of every structural rejection reason
pub const STRUCTURAL_PREFIX: &str = "Structural defect: ";

/// Separator between defects in a structural rejection reason
pub const DEFECT_SEPARATOR: &str = "; ";

/// Structural defects of an item, each naming the offending field
///
/// An empty list means the item may be scored.
pub fn defects(item: &EvidenceItem) -> Vec<String> {
    let mut found = Vec::new();

    match &item.payload {
        Payload::BlockchainTransaction(p) => {
            if is_placeholder(&p.from_address) && is_placeholder(&p.to_address) {
                found.push("from_address/to_address missing (no wallet address)".to_string());
            }
            if p.amount_usd == 0.0 && p.amount_crypto != 0.0 {
                found.push("amount_usd=0 (placeholder)".to_string());
            }
            if p.from_wallet.is_contradictory() {
                found.push("from_wallet has 'known' attribution but 'unknown' entity".to_string());
            }
            if p.to_wallet.is_contradictory() {
                found.push("to_wallet has 'known' attribution but 'unknown' entity".to_string());
            }
        }
        Payload::DocumentSummary(p) => {
            if is_placeholder(&p.source_file) {
                found.push(missing("source_file", &p.source_file));
            }
        }
        Payload::UrlPattern(p) => {
            if is_placeholder(&p.url) {
                found.push(missing("url", &p.url));
            }
        }
        Payload::EntityLink(p) => {
            if is_placeholder(&p.entity_name) {
                found.push(missing("entity_name", &p.entity_name));
            }
        }
    }

    if found.is_empty() && item.key_facts().is_empty() {
        found.push("no populated key facts".to_string());
    }
    found
}

fn missing(field: &str, value: &str) -> String {
    if value.trim().is_empty() {
        format!("{} missing", field)
    } else {
        format!("{}='{}' (placeholder)", field, value.trim())
    }
}

/// Rejection reason for a list of defects
pub fn reason(defects: &[String]) -> String {
    format!("{}{}", STRUCTURAL_PREFIX, defects.join(DEFECT_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use corroborate_domain::{
        BlockchainPayload, DocumentSummaryPayload, EntityLinkPayload, UrlPatternPayload,
        WalletAttribution,
    };

    fn item(payload: Payload) -> EvidenceItem {
        EvidenceItem::new("X-1", payload)
    }

    #[test]
    fn test_zero_usd_with_crypto_amount() {
        let found = defects(&item(Payload::BlockchainTransaction(BlockchainPayload {
            from_address: "0xabc".to_string(),
            amount_usd: 0.0,
            amount_crypto: 2.5,
            ..Default::default()
        })));
        assert_eq!(found, vec!["amount_usd=0 (placeholder)"]);
    }

    #[test]
    fn test_zero_value_transfer_is_legitimate() {
        let found = defects(&item(Payload::BlockchainTransaction(BlockchainPayload {
            from_address: "0xabc".to_string(),
            ..Default::default()
        })));
        assert!(found.is_empty());
    }

    #[test]
    fn test_blockchain_needs_an_address() {
        let found = defects(&item(Payload::BlockchainTransaction(BlockchainPayload {
            tx_hash: "0xfeed".to_string(),
            amount_usd: 10.0,
            ..Default::default()
        })));
        assert!(found[0].contains("no wallet address"));
    }

    #[test]
    fn test_contradictory_wallet_attribution() {
        let found = defects(&item(Payload::BlockchainTransaction(BlockchainPayload {
            from_address: "0xabc".to_string(),
            to_wallet: WalletAttribution {
                entity: "Unknown".to_string(),
                attribution: "known".to_string(),
            },
            ..Default::default()
        })));
        assert_eq!(found, vec!["to_wallet has 'known' attribution but 'unknown' entity"]);
    }

    #[test]
    fn test_required_fields_per_category() {
        let summary = defects(&item(Payload::DocumentSummary(DocumentSummaryPayload::default())));
        assert_eq!(summary, vec!["source_file missing"]);

        let url = defects(&item(Payload::UrlPattern(UrlPatternPayload::default())));
        assert_eq!(url, vec!["url missing"]);

        let entity = defects(&item(Payload::EntityLink(EntityLinkPayload {
            entity_name: "unknown".to_string(),
            ..Default::default()
        })));
        assert_eq!(entity, vec!["entity_name='unknown' (placeholder)"]);
    }

    #[test]
    fn test_no_key_facts_is_a_defect() {
        let found = defects(&item(Payload::DocumentSummary(DocumentSummaryPayload {
            source_file: "summary.md".to_string(),
            ..Default::default()
        })));
        assert_eq!(found, vec!["no populated key facts"]);
        assert_eq!(reason(&found), "Structural defect: no populated key facts");
    }
}
