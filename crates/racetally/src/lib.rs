//! # racetally
//!
//! Core library for the RCCars race result tracker.
//!
//! This crate provides:
//! - Windows process location and read-only memory access
//! - Decoding of the game's in-memory race result structures
//! - Session storage and score aggregation across races
//!
//! The binary memory schema (addresses, strides, buffer widths) is tied to
//! one build of the game and lives in [`memory::MemoryLayout`], loadable from
//! a JSON file for other builds.

pub mod error;
pub mod memory;
pub mod prelude;
pub mod race;
pub mod session;
pub mod tracker;

pub use error::{Error, Result};
pub use memory::{
    MemoryLayout, MemoryReader, ProcessHandle, ReadMemory, decode_windows_1251, find_process_id,
    load_layout, save_layout,
};
pub use race::{RaceSnapshot, RaceType, capture_snapshot, map_display_name};
pub use session::{
    LeaderboardEntry, Session, SnapshotId, cumulative_standings, per_snapshot_standings,
};
pub use tracker::{Tracker, TrackerConfig};
