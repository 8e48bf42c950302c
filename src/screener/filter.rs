//! Small-cap universe filter

use super::ScreenerRecord;
use crate::config::ScreenerConfig;
use crate::snapshot::Row;

/// Filters raw screener records down to the tracked universe
#[derive(Debug, Clone)]
pub struct UniverseFilter {
    max_price: f64,
    exclude_exchanges: Vec<String>,
    limit: usize,
}

impl UniverseFilter {
    /// Create a filter
    pub fn new(max_price: f64, exclude_exchanges: Vec<String>, limit: usize) -> Self {
        Self {
            max_price,
            exclude_exchanges: exclude_exchanges
                .into_iter()
                .map(|e| e.to_uppercase())
                .collect(),
            limit,
        }
    }

    /// Create from application config
    pub fn from_config(config: &ScreenerConfig) -> Self {
        Self::new(
            config.max_price,
            config.exclude_exchanges.clone(),
            config.limit,
        )
    }

    /// Whether a row belongs to the universe
    pub fn accepts(&self, row: &Row) -> bool {
        row.price < self.max_price
            && !self
                .exclude_exchanges
                .iter()
                .any(|e| *e == row.exchange.to_uppercase())
    }

    /// Convert and filter records, keeping server sort order, up to the limit
    pub fn apply(&self, records: impl IntoIterator<Item = ScreenerRecord>) -> Vec<Row> {
        records
            .into_iter()
            .filter_map(ScreenerRecord::into_row)
            .filter(|row| self.accepts(row))
            .take(self.limit)
            .collect()
    }
}

impl Default for UniverseFilter {
    fn default() -> Self {
        Self::from_config(&ScreenerConfig::default())
    }
}
