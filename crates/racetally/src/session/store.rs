use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::race::RaceSnapshot;

/// Session-scoped snapshot identifier. Ids start at 1 and only grow; a
/// removed id is never reused within the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SnapshotId(pub u32);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-owned collection of snapshots for one run of the tool.
///
/// Purely in-memory: created at startup, mutated by add/remove, gone at
/// exit. Iteration order is id order, which is also insertion order.
#[derive(Debug)]
pub struct Session {
    snapshots: BTreeMap<SnapshotId, RaceSnapshot>,
    next_id: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            snapshots: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Store a snapshot and return its assigned id.
    pub fn add(&mut self, snapshot: RaceSnapshot) -> SnapshotId {
        let id = SnapshotId(self.next_id);
        self.next_id += 1;
        self.snapshots.insert(id, snapshot);
        id
    }

    pub fn remove(&mut self, id: SnapshotId) -> Result<()> {
        self.snapshots
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::SnapshotNotFound(id))
    }

    pub fn get(&self, id: SnapshotId) -> Option<&RaceSnapshot> {
        self.snapshots.get(&id)
    }

    /// Snapshots in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (SnapshotId, &RaceSnapshot)> {
        self.snapshots.iter().map(|(&id, snap)| (id, snap))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
