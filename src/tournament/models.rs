use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::{
    errors::TournamentError,
    rounds::{BracketRound, LoserRound, MatchKind, Stage},
    slot::Slot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

/// Where an emitted winner or loser is expected to play next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    Pool,
    Bracket,
    LoserBracket,
    Eliminated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Assigned by the backend; `None` until the match has been saved.
    #[serde(default)]
    pub id: Option<u64>,
    /// Client-generated token used to pair local matches with saved ones.
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    #[serde(default)]
    pub team_a: Slot,
    #[serde(default)]
    pub team_b: Slot,
    pub kind: MatchKind,
    #[serde(default)]
    pub winner_code: Option<String>,
    #[serde(default)]
    pub loser_code: Option<String>,
    #[serde(default)]
    pub winner_destination: Option<Destination>,
    #[serde(default)]
    pub loser_destination: Option<Destination>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub score_a: Option<u32>,
    #[serde(default)]
    pub score_b: Option<u32>,
    #[serde(default)]
    pub winner_points: Option<u32>,
    #[serde(default)]
    pub loser_points: Option<u32>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(kind: MatchKind, team_a: Slot, team_b: Slot) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            team_a,
            team_b,
            kind,
            winner_code: None,
            loser_code: None,
            winner_destination: None,
            loser_destination: None,
            status: MatchStatus::Planned,
            score_a: None,
            score_b: None,
            winner_points: None,
            loser_points: None,
            court: None,
            scheduled_at: None,
        }
    }

    pub fn with_codes(mut self, winner_code: impl Into<String>, loser_code: impl Into<String>) -> Self {
        self.winner_code = Some(winner_code.into());
        self.loser_code = Some(loser_code.into());
        self
    }

    pub fn with_points(mut self, winner_points: u32, loser_points: u32) -> Self {
        self.winner_points = Some(winner_points);
        self.loser_points = Some(loser_points);
        self
    }

    /// Marks the match completed with the given score.
    pub fn complete(&mut self, score_a: u32, score_b: u32) {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self.status = MatchStatus::Completed;
    }

    /// Scores of a completed match; `None` while either is missing.
    pub fn final_scores(&self) -> Option<(u32, u32)> {
        if self.status != MatchStatus::Completed {
            return None;
        }
        Some((self.score_a?, self.score_b?))
    }

    /// The reference downstream slots use for this match's winner.
    pub fn emitted_winner(&self) -> Option<Slot> {
        let stage = self.kind.stage()?;
        self.winner_code.as_ref().map(|code| Slot::Winner {
            stage,
            code: code.clone(),
        })
    }

    /// The reference downstream slots use for this match's loser.
    pub fn emitted_loser(&self) -> Option<Slot> {
        let stage = self.kind.stage()?;
        self.loser_code.as_ref().map(|code| Slot::Loser {
            stage,
            code: code.clone(),
        })
    }

    /// Same two teams, either orientation.
    pub fn is_between(&self, a: &Slot, b: &Slot) -> bool {
        (self.team_a == *a && self.team_b == *b) || (self.team_a == *b && self.team_b == *a)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub name: String,
    #[serde(default)]
    pub teams: Vec<Slot>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub qualified_to_finals: usize,
    #[serde(default)]
    pub qualified_to_loser_bracket: usize,
}

impl Pool {
    pub fn new(name: impl Into<String>, teams: Vec<Slot>) -> Self {
        Self {
            name: name.into(),
            teams,
            ..Self::default()
        }
    }

    /// Pool positions that advance to the bracket.
    pub fn finals_qualifiers(&self) -> Vec<Slot> {
        self.positions(1, self.qualified_to_finals)
    }

    /// Pool positions right after the finals qualifiers, sent to the loser bracket.
    pub fn loser_bracket_qualifiers(&self) -> Vec<Slot> {
        self.positions(
            self.qualified_to_finals.saturating_add(1),
            self.qualified_to_loser_bracket,
        )
    }

    // Positions past the last listed team never resolve.
    fn positions(&self, first: usize, count: usize) -> Vec<Slot> {
        let end = first
            .saturating_add(count)
            .min(self.teams.len().saturating_add(1));
        (first..end)
            .map(|position| Slot::PoolPosition {
                pool: self.name.clone(),
                position,
            })
            .collect()
    }
}

/// A single-elimination structure over the round vocabulary `R`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket<R> {
    pub name: String,
    pub enabled_rounds: Vec<R>,
    /// Entrants of the first enabled round.
    #[serde(default)]
    pub teams: Vec<Slot>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub loser_to_loser_bracket: bool,
}

impl<R> Bracket<R> {
    pub fn new(name: impl Into<String>, enabled_rounds: Vec<R>, teams: Vec<Slot>) -> Self {
        Self {
            name: name.into(),
            enabled_rounds,
            teams,
            matches: Vec::new(),
            loser_to_loser_bracket: false,
        }
    }
}

pub type EliminationBracket = Bracket<BracketRound>;
pub type LoserBracket = Bracket<LoserRound>;

/// The whole tournament state every progression function reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qualification_matches: Vec<Match>,
    #[serde(default)]
    pub pools: Vec<Pool>,
    #[serde(default)]
    pub brackets: Vec<EliminationBracket>,
    #[serde(default)]
    pub loser_brackets: Vec<LoserBracket>,
}

impl Tournament {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            qualification_matches: Vec::new(),
            pools: Vec::new(),
            brackets: Vec::new(),
            loser_brackets: Vec::new(),
        }
    }

    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|pool| pool.name == name)
    }

    pub fn pool_mut(&mut self, name: &str) -> Option<&mut Pool> {
        self.pools.iter_mut().find(|pool| pool.name == name)
    }

    /// Every match of the tournament: qualification, pools, brackets, loser brackets.
    pub fn all_matches(&self) -> impl Iterator<Item = &Match> + '_ {
        self.qualification_matches
            .iter()
            .chain(self.pools.iter().flat_map(|pool| pool.matches.iter()))
            .chain(self.brackets.iter().flat_map(|bracket| bracket.matches.iter()))
            .chain(
                self.loser_brackets
                    .iter()
                    .flat_map(|bracket| bracket.matches.iter()),
            )
    }

    pub fn all_matches_mut(&mut self) -> impl Iterator<Item = &mut Match> + '_ {
        self.qualification_matches
            .iter_mut()
            .chain(self.pools.iter_mut().flat_map(|pool| pool.matches.iter_mut()))
            .chain(
                self.brackets
                    .iter_mut()
                    .flat_map(|bracket| bracket.matches.iter_mut()),
            )
            .chain(
                self.loser_brackets
                    .iter_mut()
                    .flat_map(|bracket| bracket.matches.iter_mut()),
            )
    }

    /// Matches that can emit codes for `stage`.
    pub fn stage_matches(&self, stage: Stage) -> Box<dyn Iterator<Item = &Match> + '_> {
        match stage {
            Stage::Qualification => Box::new(self.qualification_matches.iter()),
            Stage::Bracket => Box::new(
                self.brackets
                    .iter()
                    .flat_map(|bracket| bracket.matches.iter()),
            ),
            Stage::LoserBracket => Box::new(
                self.loser_brackets
                    .iter()
                    .flat_map(|bracket| bracket.matches.iter()),
            ),
        }
    }

    pub fn find_match(&self, uuid: Uuid) -> Option<&Match> {
        self.all_matches().find(|m| m.uuid == uuid)
    }

    pub fn find_match_mut(&mut self, uuid: Uuid) -> Option<&mut Match> {
        self.all_matches_mut().find(|m| m.uuid == uuid)
    }

    /// Enters the final score of a match and marks it completed.
    pub fn record_result(
        &mut self,
        match_uuid: Uuid,
        score_a: u32,
        score_b: u32,
    ) -> Result<&Match, TournamentError> {
        let m = self
            .find_match_mut(match_uuid)
            .ok_or(TournamentError::MatchNotFound(match_uuid))?;

        if m.status == MatchStatus::Cancelled {
            return Err(TournamentError::MatchCancelled(match_uuid));
        }

        m.complete(score_a, score_b);
        Ok(m)
    }

    /// Copies ids assigned by the backend onto local matches, pairing them by
    /// `uuid`. Returns how many matches received an id.
    pub fn reconcile_ids(&mut self, persisted: &Tournament) -> usize {
        let assigned: HashMap<Uuid, u64> = persisted
            .all_matches()
            .filter_map(|m| m.id.map(|id| (m.uuid, id)))
            .collect();

        let mut reconciled = 0;
        for m in self.all_matches_mut().filter(|m| m.id.is_none()) {
            if let Some(id) = assigned.get(&m.uuid) {
                m.id = Some(*id);
                reconciled += 1;
            }
        }
        reconciled
    }
}
