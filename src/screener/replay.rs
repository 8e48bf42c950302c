//! Replay of recorded screener captures
//!
//! Reads `*.json` files from a directory in filename order, one snapshot per
//! file. A file holds either a bare array of screener records or an object
//! with a `timestamp` and `records`.
//!
//! In follow mode the directory is rescanned whenever the queue runs dry and
//! only the newest unseen capture is served, so an external recorder can keep
//! dropping files while the tracker polls.

use super::{Screener, ScreenerError, ScreenerRecord, UniverseFilter};
use crate::snapshot::Snapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// On-disk capture layout
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordedCapture {
    Stamped {
        timestamp: DateTime<Utc>,
        records: Vec<ScreenerRecord>,
    },
    Bare(Vec<ScreenerRecord>),
}

/// Screener that serves recorded captures one per fetch
pub struct ReplayScreener {
    pending: VecDeque<PathBuf>,
    filter: UniverseFilter,
    follow: Option<PathBuf>,
    last_served: Option<PathBuf>,
}

impl ReplayScreener {
    /// Queue every `*.json` file in `dir`, sorted by file name
    pub fn from_dir(dir: impl AsRef<Path>, filter: UniverseFilter) -> Result<Self, ScreenerError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_capture(path))
            .collect();
        files.sort();

        tracing::info!(
            dir = ?dir.as_ref(),
            captures = files.len(),
            "Loaded screener captures for replay"
        );

        Ok(Self::from_files(files, filter))
    }

    /// Queue the given files in order
    pub fn from_files(files: impl IntoIterator<Item = PathBuf>, filter: UniverseFilter) -> Self {
        Self {
            pending: files.into_iter().collect(),
            filter,
            follow: None,
            last_served: None,
        }
    }

    /// Poll `dir` for new captures; never exhausted
    pub fn follow_dir(dir: impl Into<PathBuf>, filter: UniverseFilter) -> Self {
        Self {
            pending: VecDeque::new(),
            filter,
            follow: Some(dir.into()),
            last_served: None,
        }
    }

    /// Queue captures newer than the last one served
    async fn refresh(&mut self, dir: &Path) -> Result<(), ScreenerError> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut fresh = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() || !is_capture(&path) {
                continue;
            }
            if self.last_served.as_ref().is_some_and(|last| path <= *last) {
                continue;
            }
            fresh.push(path);
        }
        fresh.sort();

        // Only the newest capture reflects the current market
        if fresh.len() > 1 {
            tracing::debug!(skipped = fresh.len() - 1, "Skipping stale captures");
        }
        self.pending.extend(fresh.pop());
        Ok(())
    }

    /// Drop all but the `n` newest queued captures
    pub fn retain_latest(&mut self, n: usize) {
        let excess = self.pending.len().saturating_sub(n);
        self.pending.drain(..excess);
    }

    /// Captures not yet served
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Parse one capture into a snapshot
    fn decode(&self, path: &Path, content: &str) -> Result<Snapshot, ScreenerError> {
        let capture: RecordedCapture =
            serde_json::from_str(content).map_err(|source| ScreenerError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let (timestamp, records) = match capture {
            RecordedCapture::Stamped { timestamp, records } => (timestamp, records),
            RecordedCapture::Bare(records) => (Utc::now(), records),
        };

        let total = records.len();
        let rows = self.filter.apply(records);
        tracing::debug!(
            path = ?path,
            total,
            kept = rows.len(),
            "Filtered capture to small-cap universe"
        );

        if rows.is_empty() {
            return Err(ScreenerError::EmptyResult);
        }

        Ok(Snapshot::from_ranked_rows(timestamp, rows))
    }
}

#[async_trait]
impl Screener for ReplayScreener {
    async fn fetch(&mut self) -> Result<Snapshot, ScreenerError> {
        if self.pending.is_empty() {
            if let Some(dir) = self.follow.clone() {
                self.refresh(&dir).await?;
            }
        }

        let path = self.pending.pop_front().ok_or(ScreenerError::EmptyResult)?;
        self.last_served = Some(path.clone());
        let content = tokio::fs::read_to_string(&path).await?;
        self.decode(&path, &content)
    }

    fn is_exhausted(&self) -> bool {
        self.follow.is_none() && self.pending.is_empty()
    }
}

fn is_capture(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
