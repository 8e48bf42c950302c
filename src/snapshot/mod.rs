//! Ranked screener snapshots
//!
//! A snapshot is one capture of the small-cap screener table at a polling
//! tick. Rows are ranked by relative volume, descending, with rank 1 being
//! the most prominent ticker.

mod history;

pub use history::HistoryWindow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ticker's observation at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Ticker symbol, unique within a snapshot
    pub ticker: String,
    /// 1-based position within the snapshot (1 = highest relative volume)
    pub rank: u32,
    /// Traded volume
    pub volume: f64,
    /// Last price
    pub price: f64,
    /// Change % over the screener's change window
    pub change_pct: f64,
    /// Change % since the open
    pub change_from_open_pct: Option<f64>,
    /// Pre-market change %
    pub premarket_change_pct: Option<f64>,
    /// Relative volume versus the 10 day average
    pub relative_volume: Option<f64>,
    /// Sector name
    pub sector: String,
    /// Listing exchange
    pub exchange: String,
    /// Free float share count
    pub float_shares: Option<f64>,
}

impl Row {
    /// Create a row with the required fields; optional fields start absent
    pub fn new(ticker: impl Into<String>, rank: u32, volume: f64, price: f64, change_pct: f64) -> Self {
        Self {
            ticker: ticker.into(),
            rank,
            volume,
            price,
            change_pct,
            change_from_open_pct: None,
            premarket_change_pct: None,
            relative_volume: None,
            sector: "Unknown".to_string(),
            exchange: String::new(),
            float_shares: None,
        }
    }

    /// Set the sector
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    /// Set the exchange
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    /// Set the relative volume
    pub fn with_relative_volume(mut self, relative_volume: f64) -> Self {
        self.relative_volume = Some(relative_volume);
        self
    }
}

/// The ranked table captured at one polling tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Rows in server-side sort order
    pub rows: Vec<Row>,
}

impl Snapshot {
    /// Create a snapshot from rows whose ranks are already set
    pub fn new(timestamp: DateTime<Utc>, rows: Vec<Row>) -> Self {
        Self { timestamp, rows }
    }

    /// Create a snapshot from rows in sort order, assigning ranks 1..=n
    pub fn from_ranked_rows(timestamp: DateTime<Utc>, rows: impl IntoIterator<Item = Row>) -> Self {
        let rows = rows
            .into_iter()
            .zip(1u32..)
            .map(|(mut row, rank)| {
                row.rank = rank;
                row
            })
            .collect();
        Self { timestamp, rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the snapshot has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
