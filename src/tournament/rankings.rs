use serde::Serialize;
use std::collections::HashMap;

use super::{
    models::Tournament,
    outcome::{loser_of, winner_of},
    resolver::resolve_slot,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub position: usize,
    pub team: String,
    pub points: u32,
}

/// Total of awarded points per team over every decided match of every phase.
///
/// Winners collect `winner_points` and losers `loser_points`; both count as
/// zero when unset. Sides are resolved first so a team reached through a
/// code is credited under its own name.
pub fn final_rankings(tournament: &Tournament) -> HashMap<String, u32> {
    let mut totals: HashMap<String, u32> = HashMap::new();

    for m in tournament.all_matches() {
        let (Some(winner), Some(loser)) = (winner_of(m), loser_of(m)) else {
            continue;
        };

        let winner = resolve_slot(winner, tournament).to_string();
        let loser = resolve_slot(loser, tournament).to_string();

        *totals.entry(winner).or_default() += m.winner_points.unwrap_or_default();
        *totals.entry(loser).or_default() += m.loser_points.unwrap_or_default();
    }

    totals
}

/// Orders totals by points, highest first, then by team name.
pub fn ranked_table(totals: &HashMap<String, u32>) -> Vec<RankingEntry> {
    let mut entries: Vec<(&String, &u32)> = totals.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (team, points))| RankingEntry {
            position: index + 1,
            team: team.clone(),
            points: *points,
        })
        .collect()
}
