//! Scan loop implementation

use super::{wait_for_shutdown, RunSummary, TickOutcome, TrackerSettings};
use crate::momentum::{Alert, AlertKind, MomentumDetector};
use crate::screener::Screener;
use crate::sink::AlertSink;
use crate::snapshot::HistoryWindow;
use crate::telemetry::{self, CounterMetric, GaugeMetric};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Polls a screener, detects momentum and forwards alerts to a sink
pub struct Tracker<S, K> {
    screener: S,
    sink: K,
    detector: MomentumDetector,
    history: HistoryWindow,
    settings: TrackerSettings,
}

impl<S: Screener, K: AlertSink> Tracker<S, K> {
    /// Create a tracker with an empty history window
    pub fn new(screener: S, sink: K, detector: MomentumDetector, settings: TrackerSettings) -> Self {
        let history = HistoryWindow::new(settings.max_history);
        Self {
            screener,
            sink,
            detector,
            history,
            settings,
        }
    }

    /// Snapshots compared so far
    pub fn history(&self) -> &HistoryWindow {
        &self.history
    }

    /// The alert sink
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Stop tracking and hand back the sink
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Run a single scan: fetch, compare with the latest good snapshot, emit
    ///
    /// A failed fetch or a malformed snapshot leaves the history untouched,
    /// so the next scan compares against the last snapshot that was pushed.
    pub async fn run_once(&mut self) -> TickOutcome {
        tracing::info!("Starting scan cycle");

        let current = match self.screener.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                telemetry::increment(CounterMetric::FailedScans);
                tracing::error!(error = %e, "Failed to get current data");
                return TickOutcome::NoSnapshot;
            }
        };
        telemetry::set_gauge(GaugeMetric::SnapshotRows, current.len() as f64);

        let started = Instant::now();
        let detected = self.detector.detect(self.history.latest(), &current);
        telemetry::record_detection_latency(started.elapsed());

        let alerts = match detected {
            Ok(alerts) => alerts,
            Err(e) => {
                telemetry::increment(CounterMetric::RejectedSnapshots);
                tracing::error!(error = %e, "Discarding malformed snapshot");
                return TickOutcome::Rejected;
            }
        };

        let (climbers, newcomers, spikes) = count_by_kind(&alerts);
        telemetry::record_alerts(AlertKind::VolumeClimber, climbers);
        telemetry::record_alerts(AlertKind::NewHighVolume, newcomers);
        telemetry::record_alerts(AlertKind::PriceSpike, spikes);

        if let Err(e) = self.sink.emit(&alerts, &current) {
            tracing::error!(error = %e, "Failed to emit alerts");
        }

        if self.history.is_empty() {
            tracing::info!(rows = current.len(), "Baseline snapshot captured");
        }
        if let Some(evicted) = self.history.push(current) {
            telemetry::increment(CounterMetric::EvictedSnapshots);
            tracing::debug!(timestamp = %evicted.timestamp, "Evicted oldest snapshot");
        }
        telemetry::increment(CounterMetric::Scans);
        telemetry::set_gauge(GaugeMetric::HistoryDepth, self.history.len() as f64);

        tracing::info!(
            climbers,
            newcomers,
            spikes,
            history = self.history.len(),
            "Scan cycle completed"
        );

        TickOutcome::Compared {
            alerts: alerts.len(),
        }
    }

    /// Scan until shutdown is signalled or the screener is exhausted
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> RunSummary {
        let mut summary = RunSummary::default();

        tracing::info!(
            interval_secs = self.settings.monitor_interval.as_secs(),
            max_history = self.settings.max_history,
            "Starting continuous volume momentum monitoring"
        );

        loop {
            if *shutdown.borrow() {
                tracing::info!("Shutdown requested before scan");
                break;
            }

            let outcome = self.run_once().await;
            summary.record(outcome);

            if self.screener.is_exhausted() {
                tracing::info!("Screener exhausted, stopping");
                break;
            }

            let wait = self.next_wait(outcome);
            tracing::info!(wait_secs = wait.as_secs(), "Waiting until next scan");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = wait_for_shutdown(&mut shutdown) => {
                    tracing::info!("Received shutdown signal");
                    break;
                }
            }
        }

        tracing::info!(
            ticks = summary.ticks,
            compared = summary.compared,
            failed = summary.failed,
            rejected = summary.rejected,
            alerts = summary.alerts,
            "Volume momentum monitoring stopped"
        );

        summary
    }

    /// Delay before the scan following `outcome`
    fn next_wait(&self, outcome: TickOutcome) -> Duration {
        match outcome {
            TickOutcome::NoSnapshot => self.settings.retry_delay,
            _ => self.settings.monitor_interval,
        }
    }
}

fn count_by_kind(alerts: &[Alert]) -> (usize, usize, usize) {
    alerts
        .iter()
        .fold((0, 0, 0), |(c, n, s), alert| match alert.kind() {
            AlertKind::VolumeClimber => (c + 1, n, s),
            AlertKind::NewHighVolume => (c, n + 1, s),
            AlertKind::PriceSpike => (c, n, s + 1),
        })
}
