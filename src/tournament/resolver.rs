use tracing::warn;

use super::{
    models::{Match, Tournament},
    outcome::{loser_of, winner_of},
    rounds::Stage,
    slot::Slot,
    standings::standings_of,
};

/// Resolves a slot string to a team name against the current tournament state.
///
/// A code that cannot be resolved yet (match not played, pool table too
/// short, unknown pool) comes back unchanged; a plain team name is returned
/// as-is and the empty string stays empty.
pub fn resolve(code: &str, tournament: &Tournament) -> String {
    resolve_slot(&Slot::parse(code), tournament).to_string()
}

/// Follows `slot` through decided matches and pool tables for as long as it
/// can, returning the furthest slot reached.
///
/// Nothing is cached: every call walks the tournament again.
pub fn resolve_slot(slot: &Slot, tournament: &Tournament) -> Slot {
    Resolver {
        tournament,
        chain: Vec::new(),
    }
    .resolve(slot)
}

struct Resolver<'a> {
    tournament: &'a Tournament,
    // References currently being expanded, outermost first.
    chain: Vec<Slot>,
}

impl<'a> Resolver<'a> {
    fn resolve(&mut self, slot: &Slot) -> Slot {
        let tournament = self.tournament;
        if self.chain.contains(slot) {
            warn!(code = %slot, "Slot reference loops back on itself, leaving it unresolved");
            return slot.clone();
        }

        match slot {
            Slot::Empty | Slot::Team(_) => slot.clone(),
            Slot::Winner { stage, code } => {
                match self.find(*stage, |m| m.winner_code.as_deref() == Some(code.as_str())) {
                    Some(m) => match winner_of(m) {
                        Some(winner) => self.descend(slot, winner),
                        None => slot.clone(),
                    },
                    None => slot.clone(),
                }
            }
            Slot::Loser { stage, code } => {
                match self.find(*stage, |m| m.loser_code.as_deref() == Some(code.as_str())) {
                    Some(m) => match loser_of(m) {
                        Some(loser) => self.descend(slot, loser),
                        None => slot.clone(),
                    },
                    None => slot.clone(),
                }
            }
            Slot::PoolPosition { pool, position } => {
                let Some(pool) = tournament.pool(pool) else {
                    return slot.clone();
                };
                let table = standings_of(pool);
                match position.checked_sub(1).and_then(|index| table.get(index)) {
                    Some(row) => self.descend(slot, &row.team),
                    None => slot.clone(),
                }
            }
        }
    }

    fn find(&self, stage: Stage, emits: impl Fn(&Match) -> bool) -> Option<&'a Match> {
        let tournament: &'a Tournament = self.tournament;
        tournament.stage_matches(stage).find(|m| emits(*m))
    }

    fn descend(&mut self, from: &Slot, next: &Slot) -> Slot {
        self.chain.push(from.clone());
        let resolved = self.resolve(next);
        self.chain.pop();
        resolved
    }
}
