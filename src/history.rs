//! Bounded history of saved ranking snapshots.
use crate::error::DashboardError;
use crate::ranking::AreaFilter;
use crate::types::{Region, ScoredRegion};
use crate::weights::WeightVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: String,
    pub name: String,
    pub area: String,
    pub score: f64,
}

impl From<&ScoredRegion> for SnapshotEntry {
    fn from(scored: &ScoredRegion) -> Self {
        Self {
            id: scored.region.id.clone(),
            name: scored.region.name.clone(),
            area: scored.region.area.clone(),
            score: scored.score,
        }
    }
}

/// What the user saw when pressing "save": weights, filter, the top of the
/// ranking and the highlighted region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub saved_at: DateTime<Utc>,
    pub weights: WeightVector,
    pub area: AreaFilter,
    pub highlighted: Option<String>,
    pub top: Vec<SnapshotEntry>,
}

impl Snapshot {
    pub fn capture(
        saved_at: DateTime<Utc>,
        weights: WeightVector,
        area: AreaFilter,
        highlighted: Option<&Region>,
        top: &[ScoredRegion],
    ) -> Self {
        Self {
            saved_at,
            weights,
            area,
            highlighted: highlighted.map(|r| r.id.clone()),
            top: top.iter().map(SnapshotEntry::from).collect(),
        }
    }
}

/// Oldest-first list of snapshots that never exceeds its capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHistory {
    capacity: usize,
    snapshots: VecDeque<Snapshot>,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SnapshotHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            snapshots: VecDeque::with_capacity(capacity.saturating_add(1)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Append and evict from the front until within capacity. Returns the
    /// evicted snapshots, oldest first.
    pub fn append(&mut self, snapshot: Snapshot) -> Vec<Snapshot> {
        self.snapshots.push_back(snapshot);
        let mut evicted = Vec::new();
        while self.snapshots.len() > self.capacity {
            if let Some(old) = self.snapshots.pop_front() {
                evicted.push(old);
            }
        }
        if !evicted.is_empty() {
            debug!(evicted = evicted.len(), "snapshot history full; dropped oldest");
        }
        evicted
    }

    /// Read a history file, keeping at most `capacity` of its newest entries.
    /// A missing file is an empty history.
    pub fn load_json(path: &Path, capacity: usize) -> Result<Self, DashboardError> {
        let mut history = Self::with_capacity(capacity);
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(history),
            Err(source) => {
                return Err(DashboardError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let stored: Vec<Snapshot> =
            serde_json::from_str(&text).map_err(|source| DashboardError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        for snapshot in stored {
            history.append(snapshot);
        }
        info!(path = %path.display(), snapshots = history.len(), "loaded snapshot history");
        Ok(history)
    }

    pub fn save_json(&self, path: &Path) -> Result<(), DashboardError> {
        let stored: Vec<&Snapshot> = self.snapshots.iter().collect();
        crate::output::write_json(path, &stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn snapshot(minute: u32) -> Snapshot {
        Snapshot {
            saved_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, minute, 0).unwrap(),
            weights: WeightVector::default(),
            area: AreaFilter::All,
            highlighted: None,
            top: Vec::new(),
        }
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let mut history = SnapshotHistory::default();
        for minute in 0..10 {
            assert!(history.append(snapshot(minute)).is_empty());
        }
        let evicted = history.append(snapshot(10));
        assert_eq!(evicted, vec![snapshot(0)]);
        assert_eq!(history.len(), 10);
        assert_eq!(history.iter().next(), Some(&snapshot(1)));
        assert_eq!(history.latest(), Some(&snapshot(10)));
    }

    #[test]
    fn json_round_trip_reapplies_capacity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let mut history = SnapshotHistory::with_capacity(5);
        for minute in 0..5 {
            history.append(snapshot(minute));
        }
        history.save_json(&path).unwrap();

        let reloaded = SnapshotHistory::load_json(&path, 3).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.iter().next(), Some(&snapshot(2)));
    }

    #[test]
    fn missing_history_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let history = SnapshotHistory::load_json(&dir.path().join("none.json"), 10).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn corrupt_history_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = SnapshotHistory::load_json(&path, 10).unwrap_err();
        assert!(matches!(err, DashboardError::Json { .. }));
    }

    #[test]
    fn unreadable_history_is_not_reported_as_dataset() {
        let dir = TempDir::new().unwrap();
        let err = SnapshotHistory::load_json(dir.path(), 10).unwrap_err();
        assert!(matches!(err, DashboardError::ReadFile { .. }));
        let message = err.to_string();
        assert!(!message.contains("dataset"));
        assert!(message.contains(&dir.path().display().to_string()));
    }
}
