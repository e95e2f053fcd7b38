//! Parse upstream extraction files into raw records

use crate::error::AggregateError;
use crate::types::RawRecord;
use serde_json::{Map, Value};
use tracing::debug;

/// Buckets written by phase-audit passes; all are merged
const PHASE_BUCKETS: [&str; 3] = ["admitted", "flagged", "rejected"];

/// Parse one extraction file into raw records
///
/// Accepted shapes:
/// - `{"evidence_items": {id: record}}` or `{"evidence_items": [record]}`
/// - a bare `{id: record}` object (keys starting with `_` are metadata)
/// - an array of records carrying `evidence_id` or `id`
/// - phase-bucketed `{"admitted": {...}, "flagged": {...}, "rejected": {...}}`
///
/// Records wrapped as `{"evidence": {...}, ...}` are unwrapped.
pub fn parse_source(text: &str, origin: &str) -> Result<Vec<RawRecord>, AggregateError> {
    let json: Value = serde_json::from_str(text)
        .map_err(|e| AggregateError::parse(origin, format!("JSON parse error: {}", e)))?;

    let records = parse_value(json, origin)?;
    debug!("Parsed {} records from {}", records.len(), origin);
    Ok(records)
}

fn parse_value(json: Value, origin: &str) -> Result<Vec<RawRecord>, AggregateError> {
    match json {
        Value::Array(entries) => parse_array(entries, origin),
        Value::Object(mut obj) => {
            if let Some(items) = obj.remove("evidence_items") {
                return match items {
                    Value::Array(_) | Value::Object(_) => parse_value(items, origin),
                    _ => Err(AggregateError::parse(
                        origin,
                        "'evidence_items' must be an object or array",
                    )),
                };
            }

            if PHASE_BUCKETS.iter().any(|bucket| obj.contains_key(*bucket)) {
                let mut records = Vec::new();
                for bucket in PHASE_BUCKETS {
                    match obj.remove(bucket) {
                        Some(Value::Object(map)) => records.extend(parse_map(map, origin)?),
                        Some(Value::Array(entries)) => records.extend(parse_array(entries, origin)?),
                        Some(Value::Null) | None => {}
                        Some(_) => {
                            return Err(AggregateError::parse(
                                origin,
                                format!("'{}' must be an object or array", bucket),
                            ))
                        }
                    }
                }
                return Ok(records);
            }

            parse_map(obj, origin)
        }
        _ => Err(AggregateError::parse(origin, "expected a JSON object or array")),
    }
}

fn parse_map(map: Map<String, Value>, origin: &str) -> Result<Vec<RawRecord>, AggregateError> {
    let mut records = Vec::with_capacity(map.len());
    for (id, value) in map {
        if id.starts_with('_') {
            continue;
        }
        let fields = into_fields(value, origin, &id)?;
        records.push(RawRecord { id, fields });
    }
    Ok(records)
}

fn parse_array(entries: Vec<Value>, origin: &str) -> Result<Vec<RawRecord>, AggregateError> {
    let mut records = Vec::with_capacity(entries.len());
    for (idx, value) in entries.into_iter().enumerate() {
        let position = format!("#{}", idx);
        let fields = into_fields(value, origin, &position)?;
        let id = record_id(&fields).ok_or_else(|| {
            AggregateError::invalid_record(origin, &position, "missing 'evidence_id' or 'id'")
        })?;
        records.push(RawRecord { id, fields });
    }
    Ok(records)
}

fn into_fields(value: Value, origin: &str, id: &str) -> Result<Map<String, Value>, AggregateError> {
    let Value::Object(mut fields) = value else {
        return Err(AggregateError::invalid_record(origin, id, "record is not a JSON object"));
    };

    if matches!(fields.get("evidence"), Some(Value::Object(_))) {
        if let Some(Value::Object(inner)) = fields.remove("evidence") {
            return Ok(inner);
        }
    }
    Ok(fields)
}

fn record_id(fields: &Map<String, Value>) -> Option<String> {
    ["evidence_id", "id"].iter().find_map(|key| match fields.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
