//! Replay command implementation

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
pub struct ReplayArgs {
    /// Directory of recorded captures (overrides config)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

impl ReplayArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dir = data_dir(config, &self.data_dir);
        let screener = ReplayScreener::from_dir(dir, universe_filter(config))?;
        tracing::info!(captures = screener.remaining(), "Replaying recorded captures");

        let settings = TrackerSettings {
            monitor_interval: Duration::ZERO,
            retry_delay: Duration::ZERO,
            ..TrackerSettings::from(&config.tracker)
        };
        let mut tracker = Tracker::new(
            screener,
            ConsoleSink::stdout(config.sink.top_n),
            MomentumDetector::new(Thresholds::from(&config.detector)),
            settings,
        );

        let summary = tracker.run(ctrl_c_shutdown()).await;
        println!(
            "\nReplayed {} captures: {} alerts, {} failed, {} rejected",
            summary.ticks, summary.alerts, summary.failed, summary.rejected
        );
        Ok(())
    }
}
