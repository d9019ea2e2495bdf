pub mod actions;
pub mod builders;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::{match_between, play, play_pool};
pub use builders::TournamentBuilder;
