//! Watch command implementation

use super::{ctrl_c_shutdown, data_dir, universe_filter};
use crate::config::Config;
use crate::momentum::{MomentumDetector, Thresholds};
use crate::screener::ReplayScreener;
use crate::sink::ConsoleSink;
use crate::tracker::{Tracker, TrackerSettings};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Directory the recorder writes captures to (overrides config)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Seconds between scans (overrides config)
    #[arg(short, long)]
    pub interval: Option<u64>,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dir = data_dir(config, &self.data_dir);
        let screener = ReplayScreener::follow_dir(dir, universe_filter(config));

        let mut settings = TrackerSettings::from(&config.tracker);
        if let Some(secs) = self.interval {
            settings.monitor_interval = Duration::from_secs(secs);
        }

        tracing::info!(dir = ?dir, "Press Ctrl+C to stop");
        let mut tracker = Tracker::new(
            screener,
            ConsoleSink::stdout(config.sink.top_n),
            MomentumDetector::new(Thresholds::from(&config.detector)),
            settings,
        );

        tracker.run(ctrl_c_shutdown()).await;
        Ok(())
    }
}
