use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Phases whose matches emit winner/loser codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Qualification,
    Bracket,
    LoserBracket,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Stage::Qualification => "qualification",
                Stage::Bracket => "bracket",
                Stage::LoserBracket => "loser-bracket",
            }
        )
    }
}

/// Which phase a match belongs to, with its round when the phase has rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "round", rename_all = "kebab-case")]
pub enum MatchKind {
    Qualification,
    Pool,
    Bracket(BracketRound),
    LoserBracket(LoserRound),
}

impl MatchKind {
    /// Pool matches feed standings, not codes, so they have no stage.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            MatchKind::Qualification => Some(Stage::Qualification),
            MatchKind::Pool => None,
            MatchKind::Bracket(_) => Some(Stage::Bracket),
            MatchKind::LoserBracket(_) => Some(Stage::LoserBracket),
        }
    }
}

// Declaration order is generation order: the third-place match is built
// while the semifinal losers are still at hand, before the final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum BracketRound {
    Quarterfinal,
    Semifinal,
    ThirdPlace,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum LoserRound {
    #[serde(rename = "round-1")]
    Round1,
    #[serde(rename = "round-2")]
    Round2,
    #[serde(rename = "round-3")]
    Round3,
    #[serde(rename = "final")]
    Final,
}

/// Round vocabulary of an elimination structure.
///
/// A round knows the token it contributes to emitted codes (`WSF1`,
/// `LLB2_1`) and how to turn such a code back into a round and match number.
pub trait Round: Copy + Eq + fmt::Debug + IntoEnumIterator {
    const STAGE: Stage;
    /// Placed between the round token and the match number.
    const SEPARATOR: &'static str;

    fn token(self) -> &'static str;

    fn kind(self) -> MatchKind;

    /// Consolation rounds are played by the losers of the preceding round
    /// instead of its winners.
    fn is_consolation(self) -> bool {
        false
    }

    /// The last round does not send anyone further.
    fn is_last(self) -> bool {
        Self::iter().last() == Some(self)
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::iter().find(|round| round.token() == token)
    }

    fn code(self, prefix: char, number: usize) -> String {
        format!("{}{}{}{}", prefix, self.token(), Self::SEPARATOR, number)
    }

    /// Parses the part of a code after its `W`/`L` prefix.
    fn parse_code(rest: &str) -> Option<(Self, usize)> {
        let (token, number) = if Self::SEPARATOR.is_empty() {
            let split = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            rest.split_at(split)
        } else {
            rest.split_once(Self::SEPARATOR)?
        };

        let round = Self::from_token(token)?;
        Some((round, parse_number(number)?))
    }
}

impl Round for BracketRound {
    const STAGE: Stage = Stage::Bracket;
    const SEPARATOR: &'static str = "";

    fn token(self) -> &'static str {
        match self {
            BracketRound::Quarterfinal => "QF",
            BracketRound::Semifinal => "SF",
            BracketRound::ThirdPlace => "TP",
            BracketRound::Final => "F",
        }
    }

    fn kind(self) -> MatchKind {
        MatchKind::Bracket(self)
    }

    fn is_consolation(self) -> bool {
        self == BracketRound::ThirdPlace
    }
}

impl Round for LoserRound {
    const STAGE: Stage = Stage::LoserBracket;
    const SEPARATOR: &'static str = "_";

    fn token(self) -> &'static str {
        match self {
            LoserRound::Round1 => "LB1",
            LoserRound::Round2 => "LB2",
            LoserRound::Round3 => "LB3",
            LoserRound::Final => "LBF",
        }
    }

    fn kind(self) -> MatchKind {
        MatchKind::LoserBracket(self)
    }
}

/// Non-empty run of ASCII digits, nothing else.
pub(crate) fn parse_number(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
