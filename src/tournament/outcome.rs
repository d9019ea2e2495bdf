use std::cmp::Ordering;

use super::{models::Match, slot::Slot};

/// The side with the strictly higher score of a completed match.
///
/// Unplayed matches, missing scores and ties have no winner.
pub fn winner_of(m: &Match) -> Option<&Slot> {
    match decide(m)? {
        Ordering::Greater => Some(&m.team_a),
        _ => Some(&m.team_b),
    }
}

/// The other side of [`winner_of`].
pub fn loser_of(m: &Match) -> Option<&Slot> {
    match decide(m)? {
        Ordering::Greater => Some(&m.team_b),
        _ => Some(&m.team_a),
    }
}

fn decide(m: &Match) -> Option<Ordering> {
    let (score_a, score_b) = m.final_scores()?;
    Some(score_a.cmp(&score_b)).filter(|ordering| *ordering != Ordering::Equal)
}
