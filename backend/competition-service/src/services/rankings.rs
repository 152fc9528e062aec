/// Ranking engine
///
/// Turns the verified reports of one (competition, indicator) pair into
/// persisted Ranking and TandemRanking rows. The previous result is replaced
/// in full inside one store transaction, so a failed run leaves the prior
/// ranking authoritative and readers never see a half-written state.
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::db::CompetitionStore;
use crate::error::{RankingError, Result};
use crate::indicators::{IndicatorConfig, ScoreSource};
use crate::models::{RankingRow, ReportRow, TandemRankingRow};
use crate::services::aggregator::payment_score;
use crate::services::placement::assign_places;

/// Summary of one successful run, for job logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingOutcome {
    pub standalone_ranked: usize,
    pub tandem_ranked: usize,
}

pub struct RankingEngine<S> {
    store: Arc<S>,
}

impl<S: CompetitionStore> RankingEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Compute and persist the ranking of one indicator for one competition.
    ///
    /// Standalone detachments and tandem pairs are ranked on disjoint
    /// numbering sequences, each starting at place 1. A detachment without a
    /// verified report gets no row; tandem pairs additionally fall back to
    /// the indicator's floor place where one is configured.
    pub async fn compute_rankings(
        &self,
        competition_id: Uuid,
        indicator: &IndicatorConfig,
    ) -> Result<RankingOutcome> {
        let competition = self
            .store
            .find_competition(competition_id)
            .await?
            .ok_or(RankingError::CompetitionNotFound(competition_id))?;

        let reports = self
            .store
            .list_verified_reports(indicator, competition_id)
            .await?;

        let (tandem_reports, standalone_reports): (Vec<ReportRow>, Vec<ReportRow>) =
            reports.into_iter().partition(|r| r.is_tandem());

        let standalone_scored = self.effective_scores(indicator, &standalone_reports).await?;
        let tandem_scored = self.effective_scores(indicator, &tandem_reports).await?;

        let standalone: Vec<RankingRow> =
            assign_places(&standalone_scored, indicator.reverse, indicator.tie_policy)
                .into_iter()
                .map(|(report, place)| RankingRow {
                    competition_id,
                    detachment_id: report.detachment_id,
                    place,
                })
                .collect();

        let mut tandem: Vec<TandemRankingRow> =
            assign_places(&tandem_scored, indicator.reverse, indicator.tie_policy)
                .into_iter()
                .filter_map(|(report, place)| {
                    report.junior_detachment_id.map(|junior| TandemRankingRow {
                        competition_id,
                        detachment_id: report.detachment_id,
                        junior_detachment_id: junior,
                        place,
                    })
                })
                .collect();

        if let Some(floor) = indicator.tandem_floor {
            self.apply_tandem_floor(competition_id, floor, &mut tandem)
                .await?;
        }

        self.store
            .replace_rankings(indicator, competition_id, &standalone, &tandem)
            .await?;

        let outcome = RankingOutcome {
            standalone_ranked: standalone.len(),
            tandem_ranked: tandem.len(),
        };

        info!(
            competition = %competition.name,
            competition_id = %competition_id,
            indicator = indicator.slug,
            standalone = outcome.standalone_ranked,
            tandem = outcome.tandem_ranked,
            "Rankings recomputed"
        );

        Ok(outcome)
    }

    /// Resolve the score each report is ranked by.
    ///
    /// Payment indicators recompute the score from the stored measurement
    /// and write it back; a report with an invalid measurement is excluded
    /// with a warning rather than failing the whole run.
    async fn effective_scores(
        &self,
        indicator: &IndicatorConfig,
        reports: &[ReportRow],
    ) -> Result<Vec<(ReportRow, f64)>> {
        let mut scored = Vec::with_capacity(reports.len());

        for report in reports {
            let score = match indicator.score_source {
                ScoreSource::Payment => match payment_score(indicator, report.measurement) {
                    Ok(score) => {
                        if score != report.score {
                            self.store
                                .update_report_score(indicator, report.id, score)
                                .await?;
                        }
                        score
                    }
                    Err(e) => {
                        warn!(
                            indicator = indicator.slug,
                            report_id = %report.id,
                            detachment_id = %report.detachment_id,
                            error = %e,
                            "Excluding report with invalid measurement"
                        );
                        continue;
                    }
                },
                ScoreSource::SubEvents(_) | ScoreSource::Stored => report.score,
            };
            scored.push((report.clone(), score));
        }

        Ok(scored)
    }

    /// Give every registered tandem pair without a verified report the
    /// configured floor place.
    async fn apply_tandem_floor(
        &self,
        competition_id: Uuid,
        floor: i32,
        tandem: &mut Vec<TandemRankingRow>,
    ) -> Result<()> {
        let ranked: HashSet<(Uuid, Uuid)> = tandem
            .iter()
            .map(|row| (row.detachment_id, row.junior_detachment_id))
            .collect();

        let pairs = self.store.list_tandem_pairs(competition_id).await?;
        for pair in pairs {
            if !ranked.contains(&(pair.detachment_id, pair.junior_detachment_id)) {
                tandem.push(TandemRankingRow {
                    competition_id,
                    detachment_id: pair.detachment_id,
                    junior_detachment_id: pair.junior_detachment_id,
                    place: floor,
                });
            }
        }

        Ok(())
    }
}
