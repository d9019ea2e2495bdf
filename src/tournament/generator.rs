// Match generation for every phase. Regenerating never throws away a match
// that still has a place in the new layout: pools key matches by their pair
// of teams, brackets by round and emitted code.

use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::debug;

use super::{
    errors::TournamentError,
    models::{Bracket, Destination, Match, Pool, Tournament},
    resolver::resolve_slot,
    rounds::{MatchKind, Round},
    slot::Slot,
};

impl Pool {
    /// Builds the full round-robin over `teams`.
    ///
    /// A match already scheduled between the same two teams (either
    /// orientation) is kept as is; matches whose pair is gone are dropped.
    pub fn generate_matches(&mut self) {
        let mut previous = std::mem::take(&mut self.matches);
        let mut generated = Vec::with_capacity(self.teams.len() * self.teams.len().saturating_sub(1) / 2);

        for (index, team_a) in self.teams.iter().enumerate() {
            for team_b in &self.teams[index + 1..] {
                match previous.iter().position(|m| m.is_between(team_a, team_b)) {
                    Some(position) => generated.push(previous.swap_remove(position)),
                    None => generated.push(Match::new(MatchKind::Pool, team_a.clone(), team_b.clone())),
                }
            }
        }

        debug!(
            pool = %self.name,
            matches = generated.len(),
            dropped = previous.len(),
            "Generated pool matches"
        );
        self.matches = generated;
    }
}

impl<R: Round> Bracket<R> {
    /// Builds every enabled round.
    ///
    /// The first enabled round pairs the seed `teams`; each later round pairs
    /// the winners of the round before it, and an unpaired entrant gets a bye
    /// into the next round. A consolation round pairs the losers of the
    /// preceding round instead.
    ///
    /// Without a tournament to resolve against, a slot filled by propagation
    /// cannot be confirmed and takes the regenerated layout. Use
    /// [`Tournament::regenerate_bracket`] to keep filled slots.
    pub fn generate_matches(&mut self) {
        self.generate_with(|_, _| false);
    }

    /// `keeps_team(fresh, team)` decides whether a team already written into
    /// a kept match still stands for the regenerated reference `fresh`.
    fn generate_with(&mut self, keeps_team: impl Fn(&Slot, &Slot) -> bool) {
        let mut previous: HashMap<(MatchKind, String), Match> = std::mem::take(&mut self.matches)
            .into_iter()
            .filter_map(|m| m.winner_code.clone().map(|code| ((m.kind, code), m)))
            .collect();

        let mut generated = Vec::new();
        let mut entrants = self.teams.clone();
        let mut eliminated: Vec<Slot> = Vec::new();

        for round in R::iter().filter(|round| self.enabled_rounds.contains(round)) {
            let pairing = if round.is_consolation() {
                &eliminated
            } else {
                &entrants
            };

            let mut advancing = Vec::new();
            let mut losers = Vec::new();
            let mut number = 0;
            for pair in pairing.chunks(2) {
                let [team_a, team_b] = pair else {
                    advancing.extend(pair.iter().cloned());
                    continue;
                };
                number += 1;

                let fresh = self.build_match(round, number, team_a.clone(), team_b.clone());
                let m = match fresh
                    .winner_code
                    .clone()
                    .and_then(|code| previous.remove(&(fresh.kind, code)))
                {
                    Some(existing) => refresh(existing, fresh, &keeps_team),
                    None => fresh,
                };

                advancing.extend(m.emitted_winner());
                losers.extend(m.emitted_loser());
                generated.push(m);
            }

            // A consolation round leaves the main path untouched.
            if !round.is_consolation() {
                entrants = advancing;
                eliminated = losers;
            }
        }

        debug!(
            bracket = %self.name,
            matches = generated.len(),
            dropped = previous.len(),
            "Generated bracket matches"
        );
        self.matches = generated;
    }

    fn build_match(&self, round: R, number: usize, team_a: Slot, team_b: Slot) -> Match {
        let mut m = Match::new(round.kind(), team_a, team_b)
            .with_codes(round.code('W', number), round.code('L', number));

        let routes_loser = self.loser_to_loser_bracket && !round.is_consolation() && !round.is_last();
        if routes_loser {
            m.loser_destination = Some(Destination::LoserBracket);
        }
        m
    }
}

/// Keeps the identity, schedule and result of `existing` while taking the
/// layout of `fresh`.
fn refresh(mut existing: Match, fresh: Match, keeps_team: &impl Fn(&Slot, &Slot) -> bool) -> Match {
    existing.team_a = merge_slot(existing.team_a, fresh.team_a, keeps_team);
    existing.team_b = merge_slot(existing.team_b, fresh.team_b, keeps_team);
    existing.loser_code = fresh.loser_code;
    existing.loser_destination = fresh.loser_destination;
    existing
}

fn merge_slot(existing: Slot, fresh: Slot, keeps_team: &impl Fn(&Slot, &Slot) -> bool) -> Slot {
    if matches!(existing, Slot::Team(_)) && fresh.is_reference() && keeps_team(&fresh, &existing) {
        existing
    } else {
        fresh
    }
}

impl Tournament {
    /// Regenerates the named bracket. A team written into a slot by
    /// propagation is kept only while the regenerated reference still
    /// resolves to that team.
    pub fn regenerate_bracket(&mut self, name: &str) -> Result<(), TournamentError> {
        let index = self
            .brackets
            .iter()
            .position(|bracket| bracket.name == name)
            .ok_or_else(|| TournamentError::BracketNotFound(name.to_string()))?;

        let mut bracket = self.brackets[index].clone();
        let tournament = &*self;
        bracket.generate_with(|fresh, team| resolve_slot(fresh, tournament) == *team);
        self.brackets[index] = bracket;
        Ok(())
    }

    /// Loser-bracket counterpart of [`Tournament::regenerate_bracket`].
    pub fn regenerate_loser_bracket(&mut self, name: &str) -> Result<(), TournamentError> {
        let index = self
            .loser_brackets
            .iter()
            .position(|bracket| bracket.name == name)
            .ok_or_else(|| TournamentError::BracketNotFound(name.to_string()))?;

        let mut bracket = self.loser_brackets[index].clone();
        let tournament = &*self;
        bracket.generate_with(|fresh, team| resolve_slot(fresh, tournament) == *team);
        self.loser_brackets[index] = bracket;
        Ok(())
    }

    /// Appends a qualification match emitting `WQ<n>` / `LQ<n>` with the next
    /// unused number.
    pub fn add_qualification_match(&mut self, team_a: Slot, team_b: Slot) -> &mut Match {
        let number = self
            .qualification_matches
            .iter()
            .filter_map(|m| m.winner_code.as_deref()?.strip_prefix("WQ")?.parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        let m = Match::new(MatchKind::Qualification, team_a, team_b)
            .with_codes(format!("WQ{number}"), format!("LQ{number}"));
        self.qualification_matches.push(m);

        let index = self.qualification_matches.len() - 1;
        &mut self.qualification_matches[index]
    }
}
