//! Screener record and error types

use crate::snapshot::Row;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a screener could not produce a snapshot this tick
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Session cookies are no longer accepted
    #[error("Authentication expired")]
    AuthenticationExpired,
    /// Transport failure talking to the data source
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The data source rejected the requested columns or filters
    #[error("Invalid field query: {0}")]
    InvalidFieldQuery(String),
    /// The query succeeded but returned no usable rows
    #[error("Screener returned no rows")]
    EmptyResult,
    /// Reading recorded data failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Recorded data could not be decoded
    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One raw screener row, keyed by TradingView column names
///
/// Every column is optional; missing values are resolved when the record is
/// converted into a [`Row`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerRecord {
    pub name: Option<String>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    #[serde(rename = "change|5")]
    pub change: Option<f64>,
    pub change_from_open: Option<f64>,
    pub premarket_change: Option<f64>,
    #[serde(rename = "relative_volume_10d_calc")]
    pub relative_volume: Option<f64>,
    #[serde(rename = "float_shares_outstanding")]
    pub float_shares: Option<f64>,
    pub sector: Option<String>,
    pub exchange: Option<String>,
}

impl ScreenerRecord {
    /// Convert into a typed row with rank 0; ranks are assigned per snapshot
    ///
    /// Returns None for records without a ticker or price.
    pub fn into_row(self) -> Option<Row> {
        let ticker = self.name.filter(|n| !n.trim().is_empty())?;
        let price = self.close?;

        Some(Row {
            ticker,
            rank: 0,
            volume: self.volume.unwrap_or(0.0),
            price,
            change_pct: self.change.unwrap_or(0.0),
            change_from_open_pct: self.change_from_open,
            premarket_change_pct: self.premarket_change,
            relative_volume: self.relative_volume,
            sector: self.sector.unwrap_or_else(|| "Unknown".to_string()),
            exchange: self.exchange.unwrap_or_default(),
            float_shares: self.float_shares,
        })
    }
}
