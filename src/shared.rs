use thiserror::Error;

use crate::tournament::TournamentError;

/// Errors surfaced by the command-line entry point.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tournament document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tournament(#[from] TournamentError),
}
