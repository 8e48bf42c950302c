//! Scan command implementation

use super::{data_dir, universe_filter};
use crate::config::Config;
use crate::momentum::{MomentumDetector, Thresholds};
use crate::screener::{ReplayScreener, Screener};
use crate::sink::{AlertSink, ConsoleSink};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory of recorded captures (overrides config)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dir = data_dir(config, &self.data_dir);
        let mut screener = ReplayScreener::from_dir(dir, universe_filter(config))?;

        screener.retain_latest(2);

        let previous = match screener.remaining() {
            2 => Some(screener.fetch().await?),
            0 => anyhow::bail!("No captures found in {:?}", dir),
            _ => None,
        };
        let current = screener.fetch().await?;

        if previous.is_none() {
            tracing::info!("Only one capture available, nothing to compare against");
        }

        let detector = MomentumDetector::new(Thresholds::from(&config.detector));
        let alerts = detector.detect(previous.as_ref(), &current)?;

        let mut sink = ConsoleSink::stdout(config.sink.top_n);
        sink.emit(&alerts, &current)?;

        tracing::info!(alerts = alerts.len(), "Single scan completed");
        Ok(())
    }
}
