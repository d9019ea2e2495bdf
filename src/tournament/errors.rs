use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(Uuid),

    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Bracket not found: {0}")]
    BracketNotFound(String),

    #[error("Match {0} is cancelled")]
    MatchCancelled(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),
}
