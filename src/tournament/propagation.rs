use tracing::{debug, info};

use super::{
    models::{Destination, EliminationBracket, LoserBracket, Match, Tournament},
    outcome::{loser_of, winner_of},
    resolver::resolve_slot,
    slot::Slot,
};

/// Collections rewritten after a match result, ready to be committed with
/// [`Tournament::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    pub qualification_matches: Vec<Match>,
    pub brackets: Vec<EliminationBracket>,
    pub loser_brackets: Vec<LoserBracket>,
    /// Number of slots that were overwritten.
    pub substitutions: usize,
}

impl Propagation {
    fn unchanged(tournament: &Tournament) -> Self {
        Self {
            qualification_matches: tournament.qualification_matches.clone(),
            brackets: tournament.brackets.clone(),
            loser_brackets: tournament.loser_brackets.clone(),
            substitutions: 0,
        }
    }
}

/// Writes the winner (and, when routed, the loser) of `completed` into every
/// downstream slot that references it.
///
/// Winners are written into brackets and loser brackets. Losers are written
/// into loser brackets only when `loser_destination` is the loser bracket.
/// This is a single hop: slots that depend on the newly filled ones are left
/// for their own feeding match to update. A tie or a missing score returns
/// the collections unchanged.
pub fn propagate(completed: &Match, tournament: &Tournament) -> Propagation {
    let mut propagation = Propagation::unchanged(tournament);

    let (Some(winner), Some(loser)) = (winner_of(completed), loser_of(completed)) else {
        debug!(match_uuid = %completed.uuid, "Match has no decided outcome, nothing to propagate");
        return propagation;
    };

    if let Some(reference) = completed.emitted_winner() {
        let team = resolve_slot(winner, tournament);
        let bracket_slots = propagation
            .brackets
            .iter_mut()
            .flat_map(|bracket| bracket.matches.iter_mut());
        propagation.substitutions += substitute(bracket_slots, &reference, &team);

        let loser_bracket_slots = propagation
            .loser_brackets
            .iter_mut()
            .flat_map(|bracket| bracket.matches.iter_mut());
        propagation.substitutions += substitute(loser_bracket_slots, &reference, &team);
    }

    if completed.loser_destination == Some(Destination::LoserBracket) {
        if let Some(reference) = completed.emitted_loser() {
            let team = resolve_slot(loser, tournament);
            let loser_bracket_slots = propagation
                .loser_brackets
                .iter_mut()
                .flat_map(|bracket| bracket.matches.iter_mut());
            propagation.substitutions += substitute(loser_bracket_slots, &reference, &team);
        }
    }

    info!(
        match_uuid = %completed.uuid,
        winner = %winner,
        loser = %loser,
        substitutions = propagation.substitutions,
        "Propagated match result"
    );

    propagation
}

fn substitute<'a>(
    matches: impl Iterator<Item = &'a mut Match>,
    reference: &Slot,
    team: &Slot,
) -> usize {
    let mut count = 0;
    for m in matches {
        for slot in [&mut m.team_a, &mut m.team_b] {
            if receives(slot, reference) {
                *slot = team.clone();
                count += 1;
            }
        }
    }
    count
}

/// A slot receives an emitted code when it holds the same reference, or when
/// the code falls outside the code grammar and the slot holds it as a plain
/// string.
fn receives(slot: &Slot, reference: &Slot) -> bool {
    if *slot == *reference {
        return true;
    }
    let code = reference.to_string();
    Slot::parse(&code) != *reference && slot.to_string() == code
}

impl Tournament {
    /// Commits the collections computed by [`propagate`].
    pub fn apply(&mut self, propagation: Propagation) {
        self.qualification_matches = propagation.qualification_matches;
        self.brackets = propagation.brackets;
        self.loser_brackets = propagation.loser_brackets;
    }
}
