mod leaderboard;
mod store;

pub use leaderboard::{LeaderboardEntry, cumulative_standings, per_snapshot_standings};
pub use store::{Session, SnapshotId};
