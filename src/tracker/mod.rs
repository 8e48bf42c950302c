//! Polling driver
//!
//! Owns the polling interval and the history window, and feeds each new
//! snapshot through the momentum detector into the alert sink. Ticks run
//! sequentially; shutdown is only observed between ticks.

mod driver;

pub use driver::Tracker;

use crate::config::TrackerConfig;
use std::time::Duration;
use tokio::sync::watch;

/// Timing and retention settings for the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Wait between successful scans (default: 120 seconds)
    pub monitor_interval: Duration,
    /// Wait after a scan that produced no snapshot (default: 30 seconds)
    pub retry_delay: Duration,
    /// Snapshots kept in the history window (default: 50)
    pub max_history: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            monitor_interval: Duration::from_secs(120),
            retry_delay: Duration::from_secs(30),
            max_history: 50,
        }
    }
}

impl From<&TrackerConfig> for TrackerSettings {
    fn from(config: &TrackerConfig) -> Self {
        Self {
            monitor_interval: Duration::from_secs(config.monitor_interval_secs),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            max_history: config.max_history,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snapshot compared against history and pushed
    Compared { alerts: usize },
    /// The screener produced no snapshot
    NoSnapshot,
    /// The snapshot was malformed and discarded
    Rejected,
}

/// Totals over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub compared: u64,
    pub failed: u64,
    pub rejected: u64,
    pub alerts: u64,
}

impl RunSummary {
    /// Fold one tick into the totals
    pub fn record(&mut self, outcome: TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Compared { alerts } => {
                self.compared += 1;
                self.alerts += alerts as u64;
            }
            TickOutcome::NoSnapshot => self.failed += 1,
            TickOutcome::Rejected => self.rejected += 1,
        }
    }
}

/// Create a shutdown signal pair; send `true` to stop the driver
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Resolve once shutdown is requested; never resolves if the sender is gone
pub(crate) async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
