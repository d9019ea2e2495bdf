use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{errors::TournamentError, models::Tournament};

/// Storage seam standing in for the backend that owns persistence.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    async fn create(&self, tournament: &Tournament) -> Result<Tournament, TournamentError>;
    async fn get(&self, id: Uuid) -> Result<Option<Tournament>, TournamentError>;
    /// Stores the tournament and returns it as persisted, with every match
    /// carrying an id.
    async fn save(&self, tournament: &Tournament) -> Result<Tournament, TournamentError>;
    async fn list(&self) -> Result<Vec<Tournament>, TournamentError>;
}

#[derive(Debug)]
pub struct InMemoryTournamentRepository {
    tournaments: Arc<RwLock<HashMap<Uuid, Tournament>>>,
    next_match_id: AtomicU64,
}

impl Default for InMemoryTournamentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self {
            tournaments: Arc::new(RwLock::new(HashMap::new())),
            next_match_id: AtomicU64::new(1),
        }
    }

    fn assign_match_ids(&self, tournament: &mut Tournament) -> usize {
        let mut assigned = 0;
        for m in tournament.all_matches_mut().filter(|m| m.id.is_none()) {
            m.id = Some(self.next_match_id.fetch_add(1, Ordering::Relaxed));
            assigned += 1;
        }
        assigned
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    #[instrument(skip(self, tournament), fields(tournament_id = %tournament.id))]
    async fn create(&self, tournament: &Tournament) -> Result<Tournament, TournamentError> {
        let mut tournaments = self.tournaments.write().await;
        if tournaments.contains_key(&tournament.id) {
            warn!("Tournament already exists in memory");
            return Err(TournamentError::Validation(format!(
                "tournament {} already exists",
                tournament.id
            )));
        }

        let mut stored = tournament.clone();
        let assigned = self.assign_match_ids(&mut stored);
        tournaments.insert(stored.id, stored.clone());

        info!(name = %stored.name, assigned_ids = assigned, "Tournament created in memory");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<Option<Tournament>, TournamentError> {
        let tournaments = self.tournaments.read().await;
        let tournament = tournaments.get(&id).cloned();
        if tournament.is_none() {
            debug!("Tournament not found in memory");
        }
        Ok(tournament)
    }

    #[instrument(skip(self, tournament), fields(tournament_id = %tournament.id))]
    async fn save(&self, tournament: &Tournament) -> Result<Tournament, TournamentError> {
        let mut tournaments = self.tournaments.write().await;
        if !tournaments.contains_key(&tournament.id) {
            return Err(TournamentError::TournamentNotFound(tournament.id));
        }

        let mut stored = tournament.clone();
        let assigned = self.assign_match_ids(&mut stored);
        tournaments.insert(stored.id, stored.clone());

        debug!(assigned_ids = assigned, "Tournament saved in memory");
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Tournament>, TournamentError> {
        let tournaments = self.tournaments.read().await;
        Ok(tournaments.values().cloned().collect())
    }
}
