/// Score aggregator
///
/// Keeps a report's `score` column consistent with its verified sub-events.
/// The store layer calls `on_sub_event_change` synchronously after any
/// create, update, or delete of a sub-event row. The hook is best-effort: a
/// missing report or a load failure is logged and swallowed, never raised to
/// the caller that mutated the sub-event.
///
/// Re-entrancy: the aggregator's own write goes through
/// `CompetitionStore::update_report_score`, which touches the score column
/// only and emits no change notification. Sub-event mutation is the sole
/// trigger, so the hook cannot fire itself.
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::CompetitionStore;
use crate::error::{RankingError, Result};
use crate::indicators::{IndicatorConfig, Reducer, ScoreSource};

pub struct ScoreAggregator<S> {
    store: Arc<S>,
}

impl<S: CompetitionStore> ScoreAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Inbound change-notification hook. Never fails; see module docs.
    pub async fn on_sub_event_change(&self, indicator: &IndicatorConfig, report_id: Uuid) {
        match self.recompute(indicator, report_id).await {
            Ok(Some(score)) => {
                debug!(
                    indicator = indicator.slug,
                    report_id = %report_id,
                    score,
                    "Report score recomputed"
                );
            }
            Ok(None) => {}
            // A report that is gone by the time the notification lands is a
            // silent no-op, not a failure.
            Err(RankingError::ReportNotFound(_)) => {
                debug!(
                    indicator = indicator.slug,
                    report_id = %report_id,
                    "Report not found, ignoring sub-event change"
                );
            }
            Err(e) => {
                warn!(
                    indicator = indicator.slug,
                    report_id = %report_id,
                    error = %e,
                    "Score recomputation skipped"
                );
            }
        }
    }

    /// Recompute one report's score from its verified sub-events.
    ///
    /// Returns the new score, or None when nothing was written because the
    /// report's own verification flag is down or the indicator does not
    /// aggregate sub-events. A missing report is `ReportNotFound`.
    async fn recompute(
        &self,
        indicator: &IndicatorConfig,
        report_id: Uuid,
    ) -> Result<Option<f64>> {
        let ScoreSource::SubEvents(reducer) = indicator.score_source else {
            return Ok(None);
        };

        let report = self
            .store
            .fetch_report(indicator, report_id)
            .await?
            .ok_or(RankingError::ReportNotFound(report_id))?;

        // An unverified report keeps its last computed score untouched.
        if !report.is_verified {
            return Ok(None);
        }

        let events = self
            .store
            .list_verified_sub_events(indicator, report_id)
            .await?;
        let values: Vec<f64> = events.iter().map(|e| e.value).collect();
        let score = reduce(reducer, &values);

        self.store
            .update_report_score(indicator, report_id, score)
            .await?;

        Ok(Some(score))
    }
}

/// Apply a reducer to sub-event values. Average of an empty set is 0.
pub fn reduce(reducer: Reducer, values: &[f64]) -> f64 {
    match reducer {
        Reducer::Sum => values.iter().sum(),
        Reducer::Count => values.len() as f64,
        Reducer::Average => {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
    }
}

/// Payment-amount score (q1-style indicators): the stored measurement is the
/// score, validated non-negative and finite. Pure; the engine writes the
/// result back to the score column.
pub fn payment_score(indicator: &IndicatorConfig, measurement: f64) -> Result<f64> {
    if !measurement.is_finite() || measurement < 0.0 {
        return Err(RankingError::InvalidMeasurement {
            indicator: indicator.slug,
            value: measurement,
        });
    }
    Ok(measurement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators;

    #[test]
    fn test_reduce_sum() {
        assert_eq!(reduce(Reducer::Sum, &[1.0, 2.0, 3.5]), 6.5);
        assert_eq!(reduce(Reducer::Sum, &[]), 0.0);
    }

    #[test]
    fn test_reduce_count() {
        assert_eq!(reduce(Reducer::Count, &[4.0, 4.0, 4.0]), 3.0);
    }

    #[test]
    fn test_reduce_average_of_empty_is_zero() {
        assert_eq!(reduce(Reducer::Average, &[]), 0.0);
        assert_eq!(reduce(Reducer::Average, &[2.0, 4.0]), 3.0);
    }

    #[test]
    fn test_payment_score_rejects_negative() {
        let q1 = indicators::find("q1").unwrap();
        assert!(payment_score(&q1, -1.0).is_err());
        assert!(payment_score(&q1, f64::NAN).is_err());
        assert_eq!(payment_score(&q1, 1500.0).unwrap(), 1500.0);
        assert_eq!(payment_score(&q1, 0.0).unwrap(), 0.0);
    }
}
