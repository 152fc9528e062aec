/// Data models for competition-service
///
/// This module defines structures for:
/// - Competition: a scoring period/cycle
/// - ReportRow: one detachment's (or tandem pair's) submission for one indicator
/// - SubEventRow: constituent records feeding an aggregated report score
/// - RankingRow / TandemRankingRow: the persisted places for one indicator
///
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scoring period. Created by an operator before a cycle starts and
/// referenced by every report and ranking row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

/// One report row for one indicator.
///
/// Standalone reports have `junior_detachment_id = None`; tandem reports
/// carry the junior (mentee) detachment alongside the mentor detachment.
/// Unique per (competition_id, detachment_id), and for tandem indicators
/// additionally per (detachment_id, junior_detachment_id).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub detachment_id: Uuid,
    pub junior_detachment_id: Option<Uuid>,
    /// Raw measurement as submitted (participant count, prize place,
    /// payment amount - indicator-specific).
    pub measurement: f64,
    /// Flipped by a regional-level verifier. Only verified reports
    /// participate in ranking.
    pub is_verified: bool,
    /// Derived score. Maintained by the score aggregator for sub-event
    /// indicators, equal to the measurement (or a transform of it) otherwise.
    pub score: f64,
}

impl ReportRow {
    pub fn is_tandem(&self) -> bool {
        self.junior_detachment_id.is_some()
    }
}

/// A constituent record of an aggregated report (e.g. one event
/// participation entry counting toward a participant-count indicator).
/// Verified individually, separately from the owning report.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubEventRow {
    pub id: Uuid,
    pub report_id: Uuid,
    pub value: f64,
    pub is_verified: bool,
}

/// Final place of a standalone detachment for one (competition, indicator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RankingRow {
    pub competition_id: Uuid,
    pub detachment_id: Uuid,
    pub place: i32,
}

/// Final place of a mentor/junior pair for one (competition, indicator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TandemRankingRow {
    pub competition_id: Uuid,
    pub detachment_id: Uuid,
    pub junior_detachment_id: Uuid,
    pub place: i32,
}

/// A registered mentor/junior pairing, owned by the organizational
/// hierarchy. Read-only here; consulted only by indicators that assign a
/// default floor place to pairs without a verified report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct TandemPair {
    pub detachment_id: Uuid,
    pub junior_detachment_id: Uuid,
}
