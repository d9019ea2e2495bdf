use coupe::tournament::{propagate, Match, Slot, Tournament};
use uuid::Uuid;

// ============================================================================
// Match Actions
// ============================================================================

/// The pool match between two teams, in either orientation.
pub fn match_between<'a>(tournament: &'a Tournament, team_a: &str, team_b: &str) -> &'a Match {
    let (a, b) = (Slot::parse(team_a), Slot::parse(team_b));
    tournament
        .pools
        .iter()
        .flat_map(|pool| pool.matches.iter())
        .find(|m| m.is_between(&a, &b))
        .unwrap_or_else(|| panic!("no pool match between {} and {}", team_a, team_b))
}

/// Records a pool result given from `team_a`'s point of view.
pub fn play_pool(
    tournament: &mut Tournament,
    team_a: &str,
    team_b: &str,
    score_a: u32,
    score_b: u32,
) -> Uuid {
    let m = match_between(tournament, team_a, team_b);
    let uuid = m.uuid;
    let (first, second) = if m.team_a == Slot::parse(team_a) {
        (score_a, score_b)
    } else {
        (score_b, score_a)
    };

    tournament
        .record_result(uuid, first, second)
        .expect("pool match should accept a result");
    uuid
}

/// Records the result of the match emitting `winner_code` and propagates it.
pub fn play(tournament: &mut Tournament, winner_code: &str, score_a: u32, score_b: u32) -> Match {
    let uuid = tournament
        .all_matches()
        .find(|m| m.winner_code.as_deref() == Some(winner_code))
        .map(|m| m.uuid)
        .unwrap_or_else(|| panic!("no match emits {}", winner_code));

    let completed = tournament
        .record_result(uuid, score_a, score_b)
        .expect("match should accept a result")
        .clone();
    let propagation = propagate(&completed, tournament);
    tournament.apply(propagation);
    completed
}
