use serde::{Deserialize, Serialize};
use std::fmt;

use super::rounds::{parse_number, BracketRound, LoserRound, Round, Stage};

/// One side of a match: a team, nothing yet, or a reference to an outcome
/// that will name the team once it is decided.
///
/// On the wire a slot is the plain string the backend stores (`"Lions"`,
/// `"WQ1"`, `"Pool A-2"`), so the stage of a reference is decided once when
/// the string is parsed and never re-sniffed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Slot {
    #[default]
    Empty,
    Team(String),
    Winner { stage: Stage, code: String },
    Loser { stage: Stage, code: String },
    PoolPosition { pool: String, position: usize },
}

impl Slot {
    pub fn team(name: impl Into<String>) -> Self {
        Slot::Team(name.into())
    }

    /// Parses a legacy slot string.
    ///
    /// Patterns are tried in a fixed order: qualification codes, pool
    /// positions, bracket codes, loser-bracket codes. Anything else is a
    /// team name.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Slot::Empty;
        }

        if let Some(slot) = parse_qualification(raw) {
            return slot;
        }

        if let Some((pool, position)) = raw.rsplit_once('-') {
            if let Some(position) = parse_number(position).filter(|p| *p > 0) {
                if !pool.is_empty() {
                    return Slot::PoolPosition {
                        pool: pool.to_string(),
                        position,
                    };
                }
            }
        }

        if let Some(slot) = parse_round_code::<BracketRound>(raw) {
            return slot;
        }

        if let Some(slot) = parse_round_code::<LoserRound>(raw) {
            return slot;
        }

        Slot::Team(raw.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// True for slots that still wait on another match or a pool table.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Slot::Winner { .. } | Slot::Loser { .. } | Slot::PoolPosition { .. }
        )
    }

    pub fn team_name(&self) -> Option<&str> {
        match self {
            Slot::Team(name) => Some(name),
            _ => None,
        }
    }
}

fn parse_qualification(raw: &str) -> Option<Slot> {
    let (prefix, rest) = split_prefix(raw)?;
    parse_number(rest.strip_prefix('Q')?)?;
    Some(outcome_slot(prefix, Stage::Qualification, raw))
}

fn parse_round_code<R: Round>(raw: &str) -> Option<Slot> {
    let (prefix, rest) = split_prefix(raw)?;
    R::parse_code(rest)?;
    Some(outcome_slot(prefix, R::STAGE, raw))
}

fn split_prefix(raw: &str) -> Option<(char, &str)> {
    let prefix = raw.chars().next().filter(|c| *c == 'W' || *c == 'L')?;
    Some((prefix, &raw[1..]))
}

fn outcome_slot(prefix: char, stage: Stage, code: &str) -> Slot {
    let code = code.to_string();
    if prefix == 'W' {
        Slot::Winner { stage, code }
    } else {
        Slot::Loser { stage, code }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => Ok(()),
            Slot::Team(name) => write!(f, "{}", name),
            Slot::Winner { code, .. } | Slot::Loser { code, .. } => write!(f, "{}", code),
            Slot::PoolPosition { pool, position } => write!(f, "{}-{}", pool, position),
        }
    }
}

impl From<String> for Slot {
    fn from(raw: String) -> Self {
        Slot::parse(&raw)
    }
}

impl From<&str> for Slot {
    fn from(raw: &str) -> Self {
        Slot::parse(raw)
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}
