//! Tracker metrics

use crate::momentum::AlertKind;
use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Snapshots fetched and compared
    Scans,
    /// Ticks where the screener returned no snapshot
    FailedScans,
    /// Snapshots rejected as malformed
    RejectedSnapshots,
    /// Snapshots evicted from the history window
    EvictedSnapshots,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Rows in the latest snapshot
    SnapshotRows,
    /// Snapshots held in the history window
    HistoryDepth,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::Scans => "momentum_scans_total",
            CounterMetric::FailedScans => "momentum_failed_scans_total",
            CounterMetric::RejectedSnapshots => "momentum_rejected_snapshots_total",
            CounterMetric::EvictedSnapshots => "momentum_evicted_snapshots_total",
        }
    }
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::SnapshotRows => "momentum_snapshot_rows",
            GaugeMetric::HistoryDepth => "momentum_history_depth",
        }
    }
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    metrics::counter!(metric.name()).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    metrics::gauge!(metric.name()).set(value);
}

/// Record how many alerts of a kind one tick produced
pub fn record_alerts(kind: AlertKind, count: usize) {
    metrics::counter!("momentum_alerts_total", "kind" => kind.as_str()).increment(count as u64);
}

/// Record time spent in one detector call
pub fn record_detection_latency(duration: Duration) {
    metrics::histogram!("momentum_detection_seconds").record(duration.as_secs_f64());
    tracing::trace!(
        value_us = duration.as_micros() as u64,
        "Recorded detection latency"
    );
}
