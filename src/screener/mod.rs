//! Screener data source
//!
//! Produces one ranked snapshot per polling tick. Raw screener columns are
//! resolved into typed rows here, so downstream code never sees missing or
//! loosely typed fields.

mod filter;
mod replay;
mod types;

pub use filter::UniverseFilter;
pub use replay::ReplayScreener;
pub use types::{ScreenerError, ScreenerRecord};

use crate::snapshot::Snapshot;
use async_trait::async_trait;

/// Trait for screener implementations
#[async_trait]
pub trait Screener: Send {
    /// Fetch the current ranked snapshot
    async fn fetch(&mut self) -> Result<Snapshot, ScreenerError>;

    /// Whether the source has nothing more to serve
    fn is_exhausted(&self) -> bool {
        false
    }
}
