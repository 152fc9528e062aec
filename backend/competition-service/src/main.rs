use std::sync::Arc;
use std::time::Duration;

use competition_service::db::PgCompetitionStore;
use competition_service::jobs::RankingBatchJob;
use competition_service::Config;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Load config
    let config = Config::from_env().expect("Failed to load config (DATABASE_URL must be set)");

    info!(
        service = %config.service_name,
        run_once = config.scheduler.run_once,
        interval_secs = config.scheduler.interval_secs,
        "Starting competition ranking service"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    let store = Arc::new(PgCompetitionStore::new(pool));
    let job = RankingBatchJob::new(config.scheduler.clone(), store);

    let stats = job.run().await?;

    info!(
        attempted = stats.runs_attempted,
        succeeded = stats.runs_succeeded,
        failed = stats.runs_failed,
        "Ranking batch job finished"
    );

    Ok(())
}
