//! Score aggregation over session snapshots.
//!
//! Scoring rule: in an N-player race the slot at index i earns N - i points,
//! so first place earns N and last place earns 1. Cumulative totals are keyed
//! by the exact decoded name; differently-capitalized names are distinct
//! players.

use std::collections::HashMap;

use crate::race::RaceSnapshot;
use crate::session::Session;

/// Derived standing, recomputed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub rank: u32,
}

/// Standings for a single race: scores N down to 1 in slot order.
pub fn per_snapshot_standings(snapshot: &RaceSnapshot) -> Vec<LeaderboardEntry> {
    let count = snapshot.player_count() as u32;
    snapshot
        .roster()
        .enumerate()
        .map(|(i, name)| LeaderboardEntry {
            name: name.to_string(),
            score: count - i as u32,
            rank: i as u32 + 1,
        })
        .collect()
}

/// Cumulative standings across every snapshot retained in the session.
///
/// Totals are summed per player; a player absent from a race neither gains
/// nor loses. Sorted by total descending; equal totals rank in
/// first-appearance order across snapshots in the order they were added.
pub fn cumulative_standings(session: &Session) -> Vec<LeaderboardEntry> {
    let mut totals: HashMap<String, u32> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for (_, snapshot) in session.iter() {
        let count = snapshot.player_count() as u32;
        for (i, name) in snapshot.roster().enumerate() {
            if !totals.contains_key(name) {
                first_seen.push(name.to_string());
            }
            *totals.entry(name.to_string()).or_insert(0) += count - i as u32;
        }
    }

    // first_seen already holds every scored player exactly once, in the
    // tie-break order; a stable sort by score keeps that order within ties.
    let mut entries: Vec<LeaderboardEntry> = first_seen
        .into_iter()
        .map(|name| {
            let score = totals[&name];
            LeaderboardEntry {
                name,
                score,
                rank: 0,
            }
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::snapshot_with_roster;

    fn names_and_scores(entries: &[LeaderboardEntry]) -> Vec<(&str, u32)> {
        entries
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect()
    }

    #[test]
    fn test_per_snapshot_scores_descend_from_player_count() {
        let snap = snapshot_with_roster("Пляж", &["A", "B", "C", "D"]);
        let standings = per_snapshot_standings(&snap);

        assert_eq!(
            names_and_scores(&standings),
            vec![("A", 4), ("B", 3), ("C", 2), ("D", 1)]
        );
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[3].rank, 4);

        // Sum of one race's scores is always N*(N+1)/2.
        let total: u32 = standings.iter().map(|e| e.score).sum();
        assert_eq!(total, 4 * 5 / 2);
    }

    #[test]
    fn test_cumulative_totals_sum_across_races() {
        let mut session = Session::new();
        session.add(snapshot_with_roster("Пляж", &["P0", "P1", "P2"]));
        session.add(snapshot_with_roster("Шахта", &["P1", "P3"]));

        let standings = cumulative_standings(&session);
        // P1: 2 + 2, P0: 3, P2 and P3: 1 each; P2 first seen earlier.
        assert_eq!(
            names_and_scores(&standings),
            vec![("P1", 4), ("P0", 3), ("P2", 1), ("P3", 1)]
        );
        assert_eq!(
            standings.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_cumulative_totals_are_order_independent() {
        let mut forward = Session::new();
        forward.add(snapshot_with_roster("Пляж", &["P0", "P1", "P2"]));
        forward.add(snapshot_with_roster("Шахта", &["P1", "P3"]));

        let mut backward = Session::new();
        backward.add(snapshot_with_roster("Шахта", &["P1", "P3"]));
        backward.add(snapshot_with_roster("Пляж", &["P0", "P1", "P2"]));

        let mut fwd: Vec<(String, u32)> = cumulative_standings(&forward)
            .into_iter()
            .map(|e| (e.name, e.score))
            .collect();
        let mut bwd: Vec<(String, u32)> = cumulative_standings(&backward)
            .into_iter()
            .map(|e| (e.name, e.score))
            .collect();
        fwd.sort();
        bwd.sort();
        assert_eq!(fwd, bwd);
    }

    #[test]
    fn test_removal_subtracts_exactly_one_contribution() {
        let mut session = Session::new();
        session.add(snapshot_with_roster("Пляж", &["P0", "P1", "P2"]));
        let second = session.add(snapshot_with_roster("Шахта", &["P1", "P3"]));

        session.remove(second).unwrap();
        let standings = cumulative_standings(&session);

        // Back to snapshot A alone: P1 loses its 2 points from B, P3 is gone,
        // P0 and P2 are untouched.
        assert_eq!(
            names_and_scores(&standings),
            vec![("P0", 3), ("P1", 2), ("P2", 1)]
        );
    }

    #[test]
    fn test_names_are_case_sensitive_players() {
        let mut session = Session::new();
        session.add(snapshot_with_roster("Пляж", &["maxon", "Maxon"]));

        let standings = cumulative_standings(&session);
        assert_eq!(
            names_and_scores(&standings),
            vec![("maxon", 2), ("Maxon", 1)]
        );
    }

    #[test]
    fn test_empty_session_has_empty_standings() {
        let session = Session::new();
        assert!(cumulative_standings(&session).is_empty());
    }
}
