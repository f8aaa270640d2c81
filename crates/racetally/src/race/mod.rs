mod capture;
mod map;
mod race_type;
mod snapshot;

pub use capture::capture_snapshot;
pub use map::map_display_name;
pub use race_type::RaceType;
pub use snapshot::RaceSnapshot;

#[cfg(test)]
pub(crate) use snapshot::snapshot_with_roster;
