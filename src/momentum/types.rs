//! Momentum alert types
//!
//! Alerts produced by comparing two consecutive screener snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a momentum alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Ticker moved up the volume rankings
    VolumeClimber,
    /// Ticker entered the top-K volume rankings
    NewHighVolume,
    /// Ticker shows a large price move
    PriceSpike,
}

impl AlertKind {
    /// Stable label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::VolumeClimber => "volume_climber",
            AlertKind::NewHighVolume => "new_high_volume",
            AlertKind::PriceSpike => "price_spike",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticker whose rank improved between two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeClimber {
    /// Ticker symbol
    pub ticker: String,
    /// Rank in the previous snapshot
    pub previous_rank: u32,
    /// Rank in the current snapshot
    pub current_rank: u32,
    /// `previous_rank - current_rank`, always positive
    pub rank_delta: u32,
    /// Current volume
    pub volume: f64,
    /// Volume change versus the previous snapshot, absent when previous volume was zero
    pub volume_change_pct: Option<f64>,
    /// Current price
    pub price: f64,
    /// Daily change %
    pub change_pct: f64,
    /// Sector label
    pub sector: String,
    /// Timestamp of the current snapshot
    pub detected_at: DateTime<Utc>,
}

/// Ticker that entered the top-K ranked set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHighVolume {
    /// Ticker symbol
    pub ticker: String,
    /// Rank in the current snapshot, within the top-K
    pub current_rank: u32,
    /// Rank in the previous snapshot when it was present but outside the top-K
    pub previous_rank: Option<u32>,
    /// Current volume
    pub volume: f64,
    /// Current price
    pub price: f64,
    /// Daily change %
    pub change_pct: f64,
    /// Sector label
    pub sector: String,
    /// Timestamp of the current snapshot
    pub detected_at: DateTime<Utc>,
}

/// Ticker with a large percentage move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSpike {
    /// Ticker symbol
    pub ticker: String,
    /// Current price
    pub price: f64,
    /// Daily change %
    pub change_pct: f64,
    /// Price change versus the previous snapshot, absent when not evaluable
    pub price_change_pct: Option<f64>,
    /// Current volume
    pub volume: f64,
    /// Volume relative to the 10-day average, when the screener reports it
    pub relative_volume: Option<f64>,
    /// Sector label
    pub sector: String,
    /// Timestamp of the current snapshot
    pub detected_at: DateTime<Utc>,
}

/// A classified momentum event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    VolumeClimber(VolumeClimber),
    NewHighVolume(NewHighVolume),
    PriceSpike(PriceSpike),
}

impl Alert {
    /// Alert category
    pub fn kind(&self) -> AlertKind {
        match self {
            Alert::VolumeClimber(_) => AlertKind::VolumeClimber,
            Alert::NewHighVolume(_) => AlertKind::NewHighVolume,
            Alert::PriceSpike(_) => AlertKind::PriceSpike,
        }
    }

    /// Ticker the alert refers to
    pub fn ticker(&self) -> &str {
        match self {
            Alert::VolumeClimber(a) => &a.ticker,
            Alert::NewHighVolume(a) => &a.ticker,
            Alert::PriceSpike(a) => &a.ticker,
        }
    }

    /// Timestamp of the snapshot that triggered the alert
    pub fn detected_at(&self) -> DateTime<Utc> {
        match self {
            Alert::VolumeClimber(a) => a.detected_at,
            Alert::NewHighVolume(a) => a.detected_at,
            Alert::PriceSpike(a) => a.detected_at,
        }
    }
}

/// Which side of a comparison a snapshot was on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSide {
    Previous,
    Current,
}

impl fmt::Display for SnapshotSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSide::Previous => f.write_str("previous"),
            SnapshotSide::Current => f.write_str("current"),
        }
    }
}

/// Malformed snapshot input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectorInputError {
    /// The same ticker appears twice in one snapshot
    #[error("Duplicate ticker {ticker} in {side} snapshot")]
    DuplicateTicker { ticker: String, side: SnapshotSide },
}
