//! Prelude module for convenient imports
//!
//! ```ignore
//! use racetally::prelude::*;
//! ```

pub use crate::error::{Error, Result};
pub use crate::memory::{MemoryLayout, MemoryReader, ReadMemory};
pub use crate::race::{RaceSnapshot, RaceType};
pub use crate::session::{LeaderboardEntry, Session, SnapshotId};
pub use crate::tracker::{Tracker, TrackerConfig};
