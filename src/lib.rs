// Library crate for the Coupe tournament progression engine
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod shared;
pub mod tournament;

// Re-export commonly used types for easier access in tests
pub use config::Config;
pub use shared::AppError;
pub use tournament::{
    final_rankings, propagate, resolve, standings_of, InMemoryTournamentRepository, Match, Pool,
    Slot, Tournament, TournamentError, TournamentService,
};
