//! CLI interface for momentum-tracker
//!
//! Provides subcommands for:
//! - `scan`: Compare the two most recent captures once
//! - `replay`: Run every recorded capture through the tracker
//! - `watch`: Poll for new captures until interrupted
//! - `config`: Show the effective configuration

mod replay;
mod scan;
mod watch;

pub use replay::ReplayArgs;
pub use scan::ScanArgs;
pub use watch::WatchArgs;

use crate::config::Config;
use crate::screener::UniverseFilter;
use crate::tracker::shutdown_channel;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "momentum-tracker")]
#[command(about = "Volume and price momentum alerts for small-cap screener snapshots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the two most recent captures once
    Scan(ScanArgs),
    /// Run every recorded capture through the tracker
    Replay(ReplayArgs),
    /// Poll for new captures until interrupted
    Watch(WatchArgs),
    /// Show the effective configuration
    Config,
}

/// Capture directory, preferring a command line override
fn data_dir<'a>(config: &'a Config, data_dir: &'a Option<PathBuf>) -> &'a Path {
    data_dir
        .as_deref()
        .unwrap_or(config.screener.data_dir.as_path())
}

fn universe_filter(config: &Config) -> UniverseFilter {
    UniverseFilter::from_config(&config.screener)
}

/// Shutdown signal wired to Ctrl-C
fn ctrl_c_shutdown() -> tokio::sync::watch::Receiver<bool> {
    let (tx, rx) = shutdown_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Monitoring stopped by user");
            let _ = tx.send(true);
        }
    });
    rx
}

/// Print the effective configuration
pub fn show_config(config: &Config) -> anyhow::Result<()> {
    println!("Current configuration:");
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
