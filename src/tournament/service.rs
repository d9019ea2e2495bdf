use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    errors::TournamentError,
    models::Tournament,
    propagation::propagate,
    rankings::{final_rankings, ranked_table, RankingEntry},
    repository::TournamentRepository,
    resolver::resolve,
    standings::{standings_of, PoolStanding},
};

/// Runs the progression engine against tournaments held by a repository.
pub struct TournamentService {
    repository: Arc<dyn TournamentRepository>,
}

impl TournamentService {
    pub fn new(repository: Arc<dyn TournamentRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, tournament), fields(tournament_id = %tournament.id))]
    pub async fn create_tournament(&self, tournament: Tournament) -> Result<Tournament, TournamentError> {
        let mut tournament = tournament;
        let persisted = self.repository.create(&tournament).await?;
        let reconciled = tournament.reconcile_ids(&persisted);
        info!(reconciled, "Tournament created");
        Ok(tournament)
    }

    #[instrument(skip(self))]
    pub async fn get_tournament(&self, id: Uuid) -> Result<Tournament, TournamentError> {
        self.repository
            .get(id)
            .await?
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_tournaments(&self) -> Result<Vec<Tournament>, TournamentError> {
        self.repository.list().await
    }

    /// Stores an edited tournament. Matches added since the last save come
    /// back with their backend ids.
    #[instrument(skip(self, tournament), fields(tournament_id = %tournament.id))]
    pub async fn save_tournament(&self, tournament: Tournament) -> Result<Tournament, TournamentError> {
        let mut tournament = tournament;
        let persisted = self.repository.save(&tournament).await?;
        let reconciled = tournament.reconcile_ids(&persisted);
        debug!(reconciled, "Tournament saved");
        Ok(tournament)
    }

    /// Enters a final score, pushes the outcome into downstream slots and
    /// stores the result.
    #[instrument(skip(self))]
    pub async fn record_result(
        &self,
        tournament_id: Uuid,
        match_uuid: Uuid,
        score_a: u32,
        score_b: u32,
    ) -> Result<Tournament, TournamentError> {
        let mut tournament = self.get_tournament(tournament_id).await?;

        let completed = tournament.record_result(match_uuid, score_a, score_b)?.clone();
        let propagation = propagate(&completed, &tournament);
        debug!(substitutions = propagation.substitutions, "Applying propagation");
        tournament.apply(propagation);

        let persisted = self.repository.save(&tournament).await?;
        tournament.reconcile_ids(&persisted);

        info!(match_uuid = %match_uuid, score_a, score_b, "Match result recorded");
        Ok(tournament)
    }

    #[instrument(skip(self))]
    pub async fn pool_standings(
        &self,
        tournament_id: Uuid,
        pool_name: &str,
    ) -> Result<Vec<PoolStanding>, TournamentError> {
        let tournament = self.get_tournament(tournament_id).await?;
        let pool = tournament
            .pool(pool_name)
            .ok_or_else(|| TournamentError::PoolNotFound(pool_name.to_string()))?;
        Ok(standings_of(pool))
    }

    #[instrument(skip(self))]
    pub async fn resolve_code(&self, tournament_id: Uuid, code: &str) -> Result<String, TournamentError> {
        let tournament = self.get_tournament(tournament_id).await?;
        Ok(resolve(code, &tournament))
    }

    #[instrument(skip(self))]
    pub async fn final_rankings(&self, tournament_id: Uuid) -> Result<Vec<RankingEntry>, TournamentError> {
        let tournament = self.get_tournament(tournament_id).await?;
        let table = ranked_table(&final_rankings(&tournament));
        debug!(teams = table.len(), "Final rankings computed");
        Ok(table)
    }
}
