//! Capture facade tying the pieces together.
//!
//! The `Tracker` is what an embedding application (CLI, overlay, whatever)
//! talks to: it locates the game, runs one decode pass per request, owns the
//! session and serves the leaderboards. Mutating operations take `&mut self`,
//! so one tracker never runs two captures at once; a concurrent embedder
//! wraps the whole tracker in its own lock.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::memory::{MemoryLayout, MemoryReader, find_process_id};
use crate::race::capture_snapshot;
use crate::session::{
    LeaderboardEntry, Session, SnapshotId, cumulative_standings, per_snapshot_standings,
};

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Executable name the game runs under.
    pub executable: String,
    /// Budget for one capture's whole read sequence; `None` disables the
    /// deadline check.
    pub read_timeout: Option<Duration>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            executable: "RCCars.exe".to_string(),
            read_timeout: Some(Duration::from_secs(2)),
        }
    }
}

/// Main application entry point.
pub struct Tracker {
    layout: MemoryLayout,
    config: TrackerConfig,
    session: Session,
}

impl Tracker {
    pub fn new(layout: MemoryLayout) -> Self {
        Self::with_config(layout, TrackerConfig::default())
    }

    pub fn with_config(layout: MemoryLayout, config: TrackerConfig) -> Self {
        Self {
            layout,
            config,
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the game process is currently running.
    pub fn game_running(&self) -> bool {
        find_process_id(&self.config.executable).is_some()
    }

    /// Locate the game, decode one snapshot and store it.
    ///
    /// The process handle is opened on the first read of the capture and
    /// released when the reader drops at the end of this call, on success and
    /// on every failure path alike.
    pub fn capture_once(&mut self) -> Result<SnapshotId> {
        let pid = find_process_id(&self.config.executable)
            .ok_or_else(|| Error::ProcessNotFound(self.config.executable.clone()))?;

        let reader = match self.config.read_timeout {
            Some(budget) => MemoryReader::with_timeout(pid, budget),
            None => MemoryReader::new(pid),
        };

        let snapshot = match capture_snapshot(&reader, &self.layout) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(pid, error = %e, "capture failed");
                return Err(e);
            }
        };

        info!(
            map = %snapshot.map_name,
            players = snapshot.player_count(),
            "race result recorded"
        );
        Ok(self.session.add(snapshot))
    }

    /// Stored snapshots as (id, map name, capture time), in insertion order.
    pub fn list_snapshots(&self) -> Vec<(SnapshotId, &str, DateTime<Utc>)> {
        self.session
            .iter()
            .map(|(id, snap)| (id, snap.map_name.as_str(), snap.captured_at))
            .collect()
    }

    pub fn remove_snapshot(&mut self, id: SnapshotId) -> Result<()> {
        self.session.remove(id)?;
        info!(%id, "snapshot removed");
        Ok(())
    }

    /// Standings for one stored race.
    pub fn per_snapshot_leaderboard(&self, id: SnapshotId) -> Result<Vec<LeaderboardEntry>> {
        let snapshot = self.session.get(id).ok_or(Error::SnapshotNotFound(id))?;
        Ok(per_snapshot_standings(snapshot))
    }

    /// Total standings across every retained race.
    pub fn cumulative_leaderboard(&self) -> Vec<LeaderboardEntry> {
        cumulative_standings(&self.session)
    }
}
