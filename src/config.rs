//! Configuration types for momentum-tracker

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub screener: ScreenerConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Screener data source and small-cap universe filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Directory of recorded screener snapshots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Only keep rows priced strictly below this
    #[serde(default = "default_max_price")]
    pub max_price: f64,

    /// Exchanges to drop (case-insensitive)
    #[serde(default = "default_exclude_exchanges")]
    pub exclude_exchanges: Vec<String>,

    /// Maximum rows per snapshot after filtering
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./momentum_data")
}
fn default_max_price() -> f64 {
    20.0
}
fn default_exclude_exchanges() -> Vec<String> {
    vec!["OTC".to_string()]
}
fn default_limit() -> usize {
    200
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_price: default_max_price(),
            exclude_exchanges: default_exclude_exchanges(),
            limit: default_limit(),
        }
    }
}

/// Alert classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Newcomers must enter ranks 1..=K
    #[serde(default = "default_top_k")]
    pub top_k_for_newcomer: u32,

    /// Minimum rank improvement for a climber
    #[serde(default = "default_min_rank_improvement")]
    pub min_rank_improvement: u32,

    /// Change % above which a ticker spikes
    #[serde(default = "default_pct_threshold")]
    pub change_pct_threshold: f64,

    /// Price change % versus the previous snapshot above which a ticker spikes
    #[serde(default = "default_pct_threshold")]
    pub price_delta_pct_threshold: f64,
}

fn default_top_k() -> u32 {
    50
}
fn default_min_rank_improvement() -> u32 {
    1
}
fn default_pct_threshold() -> f64 {
    5.0
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            top_k_for_newcomer: default_top_k(),
            min_rank_improvement: default_min_rank_improvement(),
            change_pct_threshold: default_pct_threshold(),
            price_delta_pct_threshold: default_pct_threshold(),
        }
    }
}

/// Polling loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds between scans
    #[serde(default = "default_monitor_interval")]
    pub monitor_interval_secs: u64,

    /// Seconds to wait after a failed scan
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Snapshots kept in the history window
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_monitor_interval() -> u64 {
    120
}
fn default_retry_delay() -> u64 {
    30
}
fn default_max_history() -> usize {
    50
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            monitor_interval_secs: default_monitor_interval(),
            retry_delay_secs: default_retry_delay(),
            max_history: default_max_history(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Rows shown per alert kind
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    5
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormatConfig,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    #[default]
    Pretty,
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormatConfig::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
