use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use super::{models::Pool, slot::Slot};

pub const WIN_POINTS: u32 = 3;
pub const DRAW_POINTS: u32 = 1;

/// One row of a pool table. Derived from the pool's matches on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStanding {
    pub position: usize,
    pub team: Slot,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub points: u32,
    pub score_diff: i64,
}

impl PoolStanding {
    fn new(team: &Slot) -> Self {
        Self {
            position: 0,
            team: team.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            points: 0,
            score_diff: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.score_diff += i64::from(scored) - i64::from(conceded);
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += WIN_POINTS;
            }
            Ordering::Less => self.lost += 1,
            Ordering::Equal => {
                self.drawn += 1;
                self.points += DRAW_POINTS;
            }
        }
    }
}

/// Ranks the pool's teams by points, then score differential.
///
/// Only teams listed in `pool.teams` get a row. A completed match involving
/// a slot that is not listed contributes nothing. Rows tied on both keys keep
/// the order of `pool.teams`.
pub fn standings_of(pool: &Pool) -> Vec<PoolStanding> {
    let mut table: Vec<PoolStanding> = pool.teams.iter().map(PoolStanding::new).collect();

    for m in &pool.matches {
        let Some((score_a, score_b)) = m.final_scores() else {
            continue;
        };

        let index_a = table.iter().position(|row| row.team == m.team_a);
        let index_b = table.iter().position(|row| row.team == m.team_b);
        let (Some(index_a), Some(index_b)) = (index_a, index_b) else {
            debug!(
                pool = %pool.name,
                team_a = %m.team_a,
                team_b = %m.team_b,
                "Skipping match with a team outside the pool"
            );
            continue;
        };
        if index_a == index_b {
            continue;
        }

        table[index_a].record(score_a, score_b);
        table[index_b].record(score_b, score_a);
    }

    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.score_diff.cmp(&a.score_diff))
    });

    for (index, row) in table.iter_mut().enumerate() {
        row.position = index + 1;
    }

    table
}
