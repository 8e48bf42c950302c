//! momentum-tracker: Volume and price momentum alerts for small-cap screeners
//!
//! This library provides the core components for:
//! - Ranked screener snapshots and a bounded history window
//! - Momentum detection (volume climbers, new high-volume names, price spikes)
//! - Screener sources, including replay of recorded captures
//! - Alert sinks for console reporting
//! - A polling driver with graceful shutdown
//! - Logging and metrics

pub mod cli;
pub mod config;
pub mod momentum;
pub mod screener;
pub mod sink;
pub mod snapshot;
pub mod telemetry;
pub mod tracker;
