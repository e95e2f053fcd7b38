//! Aggregator implementation

use crate::config::{AggregatorConfig, CollisionPolicy};
use crate::error::AggregateError;
use crate::normalize::normalize;
use crate::parser::parse_source;
use crate::types::{Aggregation, Overwrite, SourceBatch};
use corroborate_domain::Category;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Source Aggregator
///
/// Merges the outputs of the upstream extraction passes into one id-keyed
/// collection. Each batch's category comes from the caller.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create a new aggregator with the given configuration
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Create an aggregator with default configuration
    pub fn default_config() -> Self {
        Self::new(AggregatorConfig::default())
    }

    /// Get the current configuration
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Read and parse one extraction file
    pub fn load_batch(category: Category, path: &Path) -> Result<SourceBatch, AggregateError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| AggregateError::Io {
            path: origin.clone(),
            source,
        })?;
        let records = parse_source(&text, &origin)?;
        Ok(SourceBatch::new(category, origin, records))
    }

    /// Load every file and aggregate them in the order given
    pub fn aggregate_files<P: AsRef<Path>>(
        &self,
        sources: &[(Category, P)],
    ) -> Result<Aggregation, AggregateError> {
        let batches = sources
            .iter()
            .map(|(category, path)| Self::load_batch(*category, path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.aggregate(batches)
    }

    /// Merge batches into one id-keyed collection
    ///
    /// Within a category a repeated id keeps the later record. Across
    /// categories a repeated id is an error unless the collision policy is
    /// [`CollisionPolicy::LastWins`]. Every overwrite is logged and recorded.
    pub fn aggregate(&self, batches: Vec<SourceBatch>) -> Result<Aggregation, AggregateError> {
        let mut aggregation = Aggregation::default();
        let mut origins: HashMap<String, (Category, String)> = HashMap::new();

        for batch in batches {
            debug!(
                "Aggregating {} {} records from {}",
                batch.records.len(),
                batch.category,
                batch.origin
            );
            *aggregation.records_read.entry(batch.category).or_insert(0) += batch.records.len();

            for record in &batch.records {
                let item = normalize(batch.category, record);

                if let Some((prev_category, prev_origin)) = origins.get(&item.id) {
                    if *prev_category != batch.category
                        && self.config.collision == CollisionPolicy::Reject
                    {
                        return Err(AggregateError::IdCollision {
                            id: item.id.clone(),
                            first: *prev_category,
                            first_origin: prev_origin.clone(),
                            second: batch.category,
                            second_origin: batch.origin.clone(),
                        });
                    }

                    warn!(
                        "Evidence id '{}' from {} ({}) replaces earlier {} record from {}",
                        item.id, batch.category, batch.origin, prev_category, prev_origin
                    );
                    aggregation.overwrites.push(Overwrite {
                        id: item.id.clone(),
                        replaced_category: *prev_category,
                        replaced_origin: prev_origin.clone(),
                        category: batch.category,
                        origin: batch.origin.clone(),
                    });
                }

                origins.insert(item.id.clone(), (batch.category, batch.origin.clone()));
                aggregation.items.insert(item.id.clone(), item);
            }
        }

        info!(
            "Aggregated {} evidence items ({} overwrites)",
            aggregation.items.len(),
            aggregation.overwrites.len()
        );
        Ok(aggregation)
    }
}
