use thiserror::Error;
use uuid::Uuid;

/// Result type for ranking and aggregation operations
pub type Result<T> = std::result::Result<T, RankingError>;

/// Errors surfaced by the ranking engine and score aggregator.
///
/// Background jobs log these and move on; nothing here ever reaches an
/// end-user request path. Uniqueness violations on report writes arrive
/// through `Database` and are surfaced unchanged to the CRUD layer that
/// attempted the write.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("competition {0} not found")]
    CompetitionNotFound(Uuid),

    #[error("report {0} not found")]
    ReportNotFound(Uuid),

    #[error("invalid measurement {value} for indicator {indicator}")]
    InvalidMeasurement { indicator: &'static str, value: f64 },

    #[error("indicator {0} has no tandem ranking table")]
    NotATandemIndicator(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
