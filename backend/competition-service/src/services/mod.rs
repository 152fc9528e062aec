pub mod aggregator;
pub mod placement;
pub mod rankings;

pub use aggregator::ScoreAggregator;
pub use rankings::{RankingEngine, RankingOutcome};
