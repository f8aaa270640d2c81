use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::race::RaceType;

/// One decoded observation of a finished race.
///
/// Immutable once built; the decoder either produces a complete snapshot or
/// fails, there is no partially-populated state. Identity is session-scoped,
/// so the snapshot itself carries no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub captured_at: DateTime<Utc>,
    /// Resolved display name, not the raw slug.
    pub map_name: String,
    pub race_type: RaceType,
    /// Finishing-order roster: index 0 is first place.
    roster: Vec<String>,
}

impl RaceSnapshot {
    /// Build a snapshot from decoded parts. The roster must be non-empty;
    /// the decoder guarantees this by failing on a zero player count.
    pub(crate) fn new(
        captured_at: DateTime<Utc>,
        map_name: String,
        race_type: RaceType,
        roster: Vec<String>,
    ) -> Self {
        debug_assert!(!roster.is_empty());
        debug_assert!(race_type.is_online());
        Self {
            captured_at,
            map_name,
            race_type,
            roster,
        }
    }

    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    /// Player name at roster slot `index`, if in range.
    pub fn player_at(&self, index: usize) -> Option<&str> {
        self.roster.get(index).map(String::as_str)
    }

    /// Roster in slot order (finishing order).
    pub fn roster(&self) -> impl Iterator<Item = &str> {
        self.roster.iter().map(String::as_str)
    }
}

/// Test helper: online snapshot with the given roster.
#[cfg(test)]
pub(crate) fn snapshot_with_roster(map: &str, names: &[&str]) -> RaceSnapshot {
    RaceSnapshot::new(
        Utc::now(),
        map.to_string(),
        RaceType::Online,
        names.iter().map(|s| s.to_string()).collect(),
    )
}
