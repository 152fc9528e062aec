/// Storage seam for the ranking engine and score aggregator.
///
/// The engine never talks to the database directly; it goes through
/// `CompetitionStore` so the batch jobs run against Postgres while tests run
/// against an in-memory implementation.
pub mod pg;

pub use pg::PgCompetitionStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::indicators::IndicatorConfig;
use crate::models::{Competition, RankingRow, ReportRow, SubEventRow, TandemPair, TandemRankingRow};

#[async_trait]
pub trait CompetitionStore: Send + Sync {
    /// Fetch one competition by id.
    async fn find_competition(&self, id: Uuid) -> Result<Option<Competition>>;

    /// All competitions, for the batch job's outer loop.
    async fn list_competitions(&self) -> Result<Vec<Competition>>;

    /// All verified reports of one indicator for one competition,
    /// standalone and tandem alike.
    async fn list_verified_reports(
        &self,
        indicator: &IndicatorConfig,
        competition_id: Uuid,
    ) -> Result<Vec<ReportRow>>;

    /// Fetch one report by id.
    async fn fetch_report(
        &self,
        indicator: &IndicatorConfig,
        report_id: Uuid,
    ) -> Result<Option<ReportRow>>;

    /// Individually verified sub-events belonging to one report.
    async fn list_verified_sub_events(
        &self,
        indicator: &IndicatorConfig,
        report_id: Uuid,
    ) -> Result<Vec<SubEventRow>>;

    /// Write the derived score of one report.
    ///
    /// Touches only the score column and must emit no change notification:
    /// sub-event mutation is the sole inbound channel of the aggregator, so
    /// routing score writes elsewhere is what keeps the aggregator from
    /// re-entering itself.
    async fn update_report_score(
        &self,
        indicator: &IndicatorConfig,
        report_id: Uuid,
        score: f64,
    ) -> Result<()>;

    /// Registered mentor/junior pairs for one competition. Consulted only by
    /// indicators with a tandem floor policy.
    async fn list_tandem_pairs(&self, competition_id: Uuid) -> Result<Vec<TandemPair>>;

    /// Replace the persisted ranking of one (competition, indicator) in
    /// full: delete every existing Ranking and TandemRanking row, insert the
    /// new ones, atomically. Readers never observe the intermediate empty
    /// state, and concurrent runs of the same indicator are serialized.
    async fn replace_rankings(
        &self,
        indicator: &IndicatorConfig,
        competition_id: Uuid,
        standalone: &[RankingRow],
        tandem: &[TandemRankingRow],
    ) -> Result<()>;
}
