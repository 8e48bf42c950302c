//! Momentum detection module
//!
//! Compares consecutive screener snapshots and classifies movement into
//! volume climbers, new high-volume entries and price spikes.

mod detector;
mod types;

pub use detector::{MomentumDetector, Thresholds};
pub use types::{
    Alert, AlertKind, DetectorInputError, NewHighVolume, PriceSpike, SnapshotSide, VolumeClimber,
};
