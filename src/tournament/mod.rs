// Public API
pub use errors::TournamentError;
pub use models::{
    Bracket, Destination, EliminationBracket, LoserBracket, Match, MatchStatus, Pool, Tournament,
};
pub use outcome::{loser_of, winner_of};
pub use propagation::{propagate, Propagation};
pub use rankings::{final_rankings, ranked_table, RankingEntry};
pub use repository::{InMemoryTournamentRepository, TournamentRepository};
pub use resolver::{resolve, resolve_slot};
pub use rounds::{BracketRound, LoserRound, MatchKind, Round, Stage};
pub use service::TournamentService;
pub use slot::Slot;
pub use standings::{standings_of, PoolStanding, DRAW_POINTS, WIN_POINTS};

// Internal modules
mod errors;
mod generator;
mod models;
mod outcome;
mod propagation;
mod rankings;
mod repository;
mod resolver;
mod rounds;
mod service;
mod slot;
mod standings;
