//! Ranking Batch Job
//!
//! Periodically recomputes every indicator's ranking for every competition.
//! Designed to run as a Kubernetes CronJob (RANKING_RUN_ONCE=true) or as a
//! long-lived loop inside the service process.
//!
//! Indicators are independent: a failure on one is logged with its
//! competition and indicator identifiers and the pass moves on. The failed
//! pair keeps its previously persisted ranking until the next tick.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::{error, info};

use crate::config::SchedulerConfig;
use crate::db::CompetitionStore;
use crate::error::Result;
use crate::indicators;
use crate::services::RankingEngine;

/// Statistics of one batch pass.
#[derive(Debug, Clone, Default)]
pub struct BatchJobStats {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub runs_attempted: u32,
    pub runs_succeeded: u32,
    pub runs_failed: u32,
    pub total_duration_ms: u64,
}

pub struct RankingBatchJob<S> {
    config: SchedulerConfig,
    store: Arc<S>,
    engine: RankingEngine<S>,
}

impl<S: CompetitionStore> RankingBatchJob<S> {
    pub fn new(config: SchedulerConfig, store: Arc<S>) -> Self {
        let engine = RankingEngine::new(store.clone());
        Self {
            config,
            store,
            engine,
        }
    }

    /// Run the batch job. Returns after one pass in run-once mode, loops
    /// with the configured interval otherwise.
    ///
    /// In loop mode a failed pass (e.g. the competition enumeration hitting
    /// a transient database error) is logged and the next tick retries it;
    /// only run-once mode surfaces the error to the caller.
    pub async fn run(&self) -> Result<BatchJobStats> {
        loop {
            match self.run_single_pass().await {
                Ok(stats) => {
                    info!(
                        attempted = stats.runs_attempted,
                        succeeded = stats.runs_succeeded,
                        failed = stats.runs_failed,
                        duration_ms = stats.total_duration_ms,
                        "Ranking batch pass completed"
                    );

                    if self.config.run_once {
                        return Ok(stats);
                    }
                }
                Err(e) => {
                    if self.config.run_once {
                        return Err(e);
                    }
                    error!(
                        error = %e,
                        "Ranking batch pass failed, retrying on next tick"
                    );
                }
            }

            info!(
                interval_secs = self.config.interval_secs,
                "Sleeping until next pass"
            );
            sleep(Duration::from_secs(self.config.interval_secs)).await;
        }
    }

    /// One pass over every competition and every registry indicator.
    async fn run_single_pass(&self) -> Result<BatchJobStats> {
        let start_time = Instant::now();
        let mut stats = BatchJobStats {
            started_at: Some(Utc::now()),
            ..Default::default()
        };

        let competitions = self.store.list_competitions().await?;
        let registry = indicators::registry();

        info!(
            competitions = competitions.len(),
            indicators = registry.len(),
            "Starting ranking batch pass"
        );

        for competition in &competitions {
            for indicator in &registry {
                stats.runs_attempted += 1;

                match self.engine.compute_rankings(competition.id, indicator).await {
                    Ok(_) => stats.runs_succeeded += 1,
                    Err(e) => {
                        stats.runs_failed += 1;
                        error!(
                            competition_id = %competition.id,
                            indicator = indicator.slug,
                            error = %e,
                            "Ranking run failed, prior result stays authoritative"
                        );
                    }
                }

                if self.config.indicator_delay_ms > 0 {
                    sleep(Duration::from_millis(self.config.indicator_delay_ms)).await;
                }
            }
        }

        stats.completed_at = Some(Utc::now());
        stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

        Ok(stats)
    }
}
