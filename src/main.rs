use coupe::{
    tournament::{resolve_slot, InMemoryTournamentRepository, Tournament, TournamentService},
    AppError, Config,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(path = %config.tournament_path.display(), "Loading tournament");
    let raw = tokio::fs::read_to_string(&config.tournament_path).await?;
    let tournament: Tournament = serde_json::from_str(&raw)?;

    let service = TournamentService::new(Arc::new(InMemoryTournamentRepository::new()));
    let tournament = service.create_tournament(tournament).await?;

    for pool in &tournament.pools {
        println!("Pool {}", pool.name);
        for row in service.pool_standings(tournament.id, &pool.name).await? {
            println!(
                "  {:>2}. {:<24} P{:<3} W{:<3} D{:<3} L{:<3} {:>4} pts  {:+}",
                row.position,
                resolve_slot(&row.team, &tournament).to_string(),
                row.played,
                row.won,
                row.drawn,
                row.lost,
                row.points,
                row.score_diff
            );
        }
    }

    let brackets = tournament
        .brackets
        .iter()
        .map(|bracket| (&bracket.name, &bracket.matches))
        .chain(
            tournament
                .loser_brackets
                .iter()
                .map(|bracket| (&bracket.name, &bracket.matches)),
        );
    for (name, matches) in brackets {
        println!("Bracket {}", name);
        for m in matches {
            let score = match m.final_scores() {
                Some((score_a, score_b)) => format!("{}-{}", score_a, score_b),
                None => "-".to_string(),
            };
            println!(
                "  {:<8} {} vs {}  {}",
                m.winner_code.as_deref().unwrap_or(""),
                resolve_slot(&m.team_a, &tournament).to_string(),
                resolve_slot(&m.team_b, &tournament).to_string(),
                score
            );
        }
    }

    println!("Final ranking");
    for entry in service.final_rankings(tournament.id).await? {
        println!("  {:>2}. {:<24} {:>4} pts", entry.position, entry.team, entry.points);
    }

    info!(tournament_id = %tournament.id, "Report complete");
    Ok(())
}
