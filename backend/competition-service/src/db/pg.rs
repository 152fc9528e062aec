/// Postgres implementation of [`CompetitionStore`].
///
/// Table names come from the indicator registry (each indicator owns its own
/// report/ranking relations), so queries are built with `format!`. The names
/// are `&'static str` registry constants, never user input.
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::CompetitionStore;
use crate::error::Result;
use crate::indicators::IndicatorConfig;
use crate::models::{Competition, RankingRow, ReportRow, SubEventRow, TandemPair, TandemRankingRow};

#[derive(Clone)]
pub struct PgCompetitionStore {
    pool: PgPool,
}

impl PgCompetitionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CompetitionStore for PgCompetitionStore {
    async fn find_competition(&self, id: Uuid) -> Result<Option<Competition>> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            SELECT id, name, starts_on, ends_on
            FROM competitions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(competition)
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            "SELECT id, name, starts_on, ends_on FROM competitions ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(competitions)
    }

    async fn list_verified_reports(
        &self,
        indicator: &IndicatorConfig,
        competition_id: Uuid,
    ) -> Result<Vec<ReportRow>> {
        let reports = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            SELECT id, competition_id, detachment_id, junior_detachment_id,
                   measurement, is_verified, score
            FROM {}
            WHERE competition_id = $1 AND is_verified = TRUE
            ORDER BY id
            "#,
            indicator.report_table
        ))
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    async fn fetch_report(
        &self,
        indicator: &IndicatorConfig,
        report_id: Uuid,
    ) -> Result<Option<ReportRow>> {
        let report = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            SELECT id, competition_id, detachment_id, junior_detachment_id,
                   measurement, is_verified, score
            FROM {}
            WHERE id = $1
            "#,
            indicator.report_table
        ))
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    async fn list_verified_sub_events(
        &self,
        indicator: &IndicatorConfig,
        report_id: Uuid,
    ) -> Result<Vec<SubEventRow>> {
        let events = sqlx::query_as::<_, SubEventRow>(&format!(
            r#"
            SELECT id, report_id, value, is_verified
            FROM {}
            WHERE report_id = $1 AND is_verified = TRUE
            ORDER BY id
            "#,
            indicator.sub_event_table()
        ))
        .bind(report_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn update_report_score(
        &self,
        indicator: &IndicatorConfig,
        report_id: Uuid,
        score: f64,
    ) -> Result<()> {
        sqlx::query(&format!(
            "UPDATE {} SET score = $2 WHERE id = $1",
            indicator.report_table
        ))
        .bind(report_id)
        .bind(score)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_tandem_pairs(&self, competition_id: Uuid) -> Result<Vec<TandemPair>> {
        let pairs = sqlx::query_as::<_, TandemPair>(
            r#"
            SELECT detachment_id, junior_detachment_id
            FROM tandem_pairs
            WHERE competition_id = $1
            ORDER BY detachment_id, junior_detachment_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pairs)
    }

    async fn replace_rankings(
        &self,
        indicator: &IndicatorConfig,
        competition_id: Uuid,
        standalone: &[RankingRow],
        tandem: &[TandemRankingRow],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent runs of the same (competition, indicator).
        // The lock is released automatically at commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(format!("{}:{}", indicator.slug, competition_id))
            .execute(&mut *tx)
            .await?;

        sqlx::query(&format!(
            "DELETE FROM {} WHERE competition_id = $1",
            indicator.ranking_table
        ))
        .bind(competition_id)
        .execute(&mut *tx)
        .await?;

        if let Some(tandem_table) = indicator.tandem_ranking_table {
            sqlx::query(&format!(
                "DELETE FROM {} WHERE competition_id = $1",
                tandem_table
            ))
            .bind(competition_id)
            .execute(&mut *tx)
            .await?;
        }

        if !standalone.is_empty() {
            let detachment_ids: Vec<Uuid> = standalone.iter().map(|r| r.detachment_id).collect();
            let places: Vec<i32> = standalone.iter().map(|r| r.place).collect();

            sqlx::query(&format!(
                r#"
                INSERT INTO {} (competition_id, detachment_id, place)
                SELECT $1, d, p FROM UNNEST($2::uuid[], $3::int[]) AS t(d, p)
                "#,
                indicator.ranking_table
            ))
            .bind(competition_id)
            .bind(&detachment_ids)
            .bind(&places)
            .execute(&mut *tx)
            .await?;
        }

        if !tandem.is_empty() {
            let tandem_table = indicator
                .tandem_ranking_table
                .ok_or(crate::error::RankingError::NotATandemIndicator(
                    indicator.slug,
                ))?;

            let detachment_ids: Vec<Uuid> = tandem.iter().map(|r| r.detachment_id).collect();
            let junior_ids: Vec<Uuid> = tandem.iter().map(|r| r.junior_detachment_id).collect();
            let places: Vec<i32> = tandem.iter().map(|r| r.place).collect();

            sqlx::query(&format!(
                r#"
                INSERT INTO {} (competition_id, detachment_id, junior_detachment_id, place)
                SELECT $1, d, j, p FROM UNNEST($2::uuid[], $3::uuid[], $4::int[]) AS t(d, j, p)
                "#,
                tandem_table
            ))
            .bind(competition_id)
            .bind(&detachment_ids)
            .bind(&junior_ids)
            .bind(&places)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
