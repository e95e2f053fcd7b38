//! Input and output types for aggregation

use corroborate_domain::{Category, EvidenceItem};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One upstream record before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Record id as found in the file
    pub id: String,

    /// Record fields
    pub fields: Map<String, Value>,
}

/// All records from one upstream extraction pass
///
/// The category is set by the caller from which pass produced the file.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    /// Category every record in the batch belongs to
    pub category: Category,

    /// Where the batch came from (file path or label)
    pub origin: String,

    /// The records, in file order
    pub records: Vec<RawRecord>,
}

impl SourceBatch {
    /// Create a batch
    pub fn new(category: Category, origin: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            category,
            origin: origin.into(),
            records,
        }
    }
}

/// A record that replaced an earlier record with the same id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overwrite {
    /// The shared id
    pub id: String,

    /// Category of the replaced record
    pub replaced_category: Category,

    /// Origin of the replaced record
    pub replaced_origin: String,

    /// Category of the record that was kept
    pub category: Category,

    /// Origin of the record that was kept
    pub origin: String,
}

/// Result of aggregating all batches
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Items keyed by id, in id order
    pub items: BTreeMap<String, EvidenceItem>,

    /// Every overwrite that happened, in processing order
    pub overwrites: Vec<Overwrite>,

    /// Records read per category, before deduplication
    pub records_read: BTreeMap<Category, usize>,
}

impl Aggregation {
    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items were aggregated
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of one category
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &EvidenceItem> {
        self.items.values().filter(move |item| item.category() == category)
    }
}
