//! Alert sinks
//!
//! Consume the alerts of one tick together with the snapshot that
//! triggered them.

mod console;

pub use console::ConsoleSink;

use crate::momentum::Alert;
use crate::snapshot::Snapshot;

/// Trait for alert sink implementations
pub trait AlertSink: Send {
    /// Handle the alerts produced for `snapshot`
    fn emit(&mut self, alerts: &[Alert], snapshot: &Snapshot) -> anyhow::Result<()>;
}
