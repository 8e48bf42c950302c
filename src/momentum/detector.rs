//! Momentum detection between consecutive snapshots
//!
//! Compares the previous and current screener snapshots and classifies
//! movement into climbers, newcomers and price spikes. The detector is a
//! pure function of its inputs: it keeps no state between calls.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::types::{
    Alert, DetectorInputError, NewHighVolume, PriceSpike, SnapshotSide, VolumeClimber,
};
use crate::snapshot::{Row, Snapshot};

/// Thresholds for alert classification
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Size of the ranked set a newcomer must enter (ranks 1..=K)
    pub top_k_for_newcomer: u32,

    /// Minimum rank improvement for a climber alert (default: 1)
    pub min_rank_improvement: u32,

    /// Change % above which a ticker is a price spike (default: 5.0)
    pub change_pct_threshold: f64,

    /// Price change % versus the previous snapshot above which a ticker is a
    /// price spike (default: 5.0)
    pub price_delta_pct_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            top_k_for_newcomer: 50,
            min_rank_improvement: 1,
            change_pct_threshold: 5.0,
            price_delta_pct_threshold: 5.0,
        }
    }
}

impl From<&crate::config::DetectorConfig> for Thresholds {
    fn from(config: &crate::config::DetectorConfig) -> Self {
        Self {
            top_k_for_newcomer: config.top_k_for_newcomer,
            min_rank_improvement: config.min_rank_improvement,
            change_pct_threshold: config.change_pct_threshold,
            price_delta_pct_threshold: config.price_delta_pct_threshold,
        }
    }
}

/// Snapshot-to-snapshot momentum detector
#[derive(Debug, Clone, Default)]
pub struct MomentumDetector {
    thresholds: Thresholds,
}

impl MomentumDetector {
    /// Create a detector with the given thresholds
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Create a detector with default thresholds
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Compare two snapshots and classify movement
    ///
    /// Returns climbers, then newcomers, then spikes. Climbers are ordered by
    /// rank delta descending, newcomers by current rank ascending and spikes
    /// by change % descending; ties fall back to ticker ascending.
    ///
    /// With no previous snapshot there is no baseline and the result is
    /// empty. A snapshot containing the same ticker twice is rejected.
    pub fn detect(
        &self,
        previous: Option<&Snapshot>,
        current: &Snapshot,
    ) -> Result<Vec<Alert>, DetectorInputError> {
        index_rows(current, SnapshotSide::Current)?;

        let Some(previous) = previous else {
            return Ok(Vec::new());
        };
        let previous_rows = index_rows(previous, SnapshotSide::Previous)?;

        let mut climbers = Vec::new();
        let mut newcomers = Vec::new();
        let mut spikes = Vec::new();

        for row in &current.rows {
            let before = previous_rows.get(row.ticker.as_str()).copied();

            if let Some(before) = before {
                if let Some(climber) = self.climber(before, row, current) {
                    climbers.push(climber);
                }
            }

            if let Some(newcomer) = self.newcomer(before, row, current) {
                newcomers.push(newcomer);
            }

            if let Some(spike) = self.spike(before, row, current) {
                spikes.push(spike);
            }
        }

        climbers.sort_by(|a, b| {
            b.rank_delta
                .cmp(&a.rank_delta)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });
        newcomers.sort_by(|a, b| {
            a.current_rank
                .cmp(&b.current_rank)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });
        spikes.sort_by(|a, b| {
            descending_pct(a.change_pct, b.change_pct).then_with(|| a.ticker.cmp(&b.ticker))
        });

        let mut alerts = Vec::with_capacity(climbers.len() + newcomers.len() + spikes.len());
        alerts.extend(climbers.into_iter().map(Alert::VolumeClimber));
        alerts.extend(newcomers.into_iter().map(Alert::NewHighVolume));
        alerts.extend(spikes.into_iter().map(Alert::PriceSpike));
        Ok(alerts)
    }

    /// Ticker present in both snapshots whose rank numerically decreased
    fn climber(&self, before: &Row, row: &Row, current: &Snapshot) -> Option<VolumeClimber> {
        let rank_delta = before.rank.checked_sub(row.rank)?;
        if rank_delta == 0 || rank_delta < self.thresholds.min_rank_improvement {
            return None;
        }

        Some(VolumeClimber {
            ticker: row.ticker.clone(),
            previous_rank: before.rank,
            current_rank: row.rank,
            rank_delta,
            volume: row.volume,
            volume_change_pct: pct_change(before.volume, row.volume),
            price: row.price,
            change_pct: row.change_pct,
            sector: row.sector.clone(),
            detected_at: current.timestamp,
        })
    }

    /// Ticker inside the top-K now that was absent from the previous top-K
    fn newcomer(&self, before: Option<&Row>, row: &Row, current: &Snapshot) -> Option<NewHighVolume> {
        let top_k = self.thresholds.top_k_for_newcomer;
        if !in_top_k(row.rank, top_k) {
            return None;
        }
        if before.is_some_and(|b| in_top_k(b.rank, top_k)) {
            return None;
        }

        Some(NewHighVolume {
            ticker: row.ticker.clone(),
            current_rank: row.rank,
            previous_rank: before.map(|b| b.rank),
            volume: row.volume,
            price: row.price,
            change_pct: row.change_pct,
            sector: row.sector.clone(),
            detected_at: current.timestamp,
        })
    }

    /// Ticker whose change % or price move since the previous snapshot is large
    ///
    /// The price branch only applies when the previous snapshot has the
    /// ticker with a positive price.
    fn spike(&self, before: Option<&Row>, row: &Row, current: &Snapshot) -> Option<PriceSpike> {
        let price_change_pct = before.and_then(|b| pct_change(b.price, row.price));

        let change_triggered = row.change_pct > self.thresholds.change_pct_threshold;
        let price_triggered =
            price_change_pct.is_some_and(|pct| pct > self.thresholds.price_delta_pct_threshold);
        if !change_triggered && !price_triggered {
            return None;
        }

        Some(PriceSpike {
            ticker: row.ticker.clone(),
            price: row.price,
            change_pct: row.change_pct,
            price_change_pct,
            volume: row.volume,
            relative_volume: row.relative_volume,
            sector: row.sector.clone(),
            detected_at: current.timestamp,
        })
    }
}

/// Larger percentage first; signed zeros compare equal and NaN sorts last
fn descending_pct(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => (b + 0.0).total_cmp(&(a + 0.0)),
    }
}

fn in_top_k(rank: u32, top_k: u32) -> bool {
    rank >= 1 && rank <= top_k
}

/// Percentage change from `from` to `to`; undefined for a non-positive base
fn pct_change(from: f64, to: f64) -> Option<f64> {
    if from <= 0.0 || !from.is_finite() || !to.is_finite() {
        return None;
    }
    Some((to - from) / from * 100.0)
}

/// Index rows by ticker, rejecting duplicates
fn index_rows(
    snapshot: &Snapshot,
    side: SnapshotSide,
) -> Result<HashMap<&str, &Row>, DetectorInputError> {
    let mut index = HashMap::with_capacity(snapshot.rows.len());
    for row in &snapshot.rows {
        if index.insert(row.ticker.as_str(), row).is_some() {
            return Err(DetectorInputError::DuplicateTicker {
                ticker: row.ticker.clone(),
                side,
            });
        }
    }
    Ok(index)
}
