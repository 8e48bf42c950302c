//! Bounded snapshot history

use super::Snapshot;
use std::collections::VecDeque;

/// Sliding window of the most recent snapshots
///
/// Appending past capacity evicts the oldest snapshot. The window holds no
/// business logic; it only supplies the previous snapshot for comparison.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    max_history: usize,
    snapshots: VecDeque<Snapshot>,
}

impl HistoryWindow {
    /// Create a window holding at most `max_history` snapshots (minimum 1)
    pub fn new(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            max_history,
            snapshots: VecDeque::with_capacity(max_history + 1),
        }
    }

    /// Append a snapshot, returning the evicted oldest one if over capacity
    pub fn push(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > self.max_history {
            self.snapshots.pop_front()
        } else {
            None
        }
    }

    /// Most recently pushed snapshot
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Maximum number of retained snapshots
    pub fn capacity(&self) -> usize {
        self.max_history
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(50)
    }
}
