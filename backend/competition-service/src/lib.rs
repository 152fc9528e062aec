pub mod config;
pub mod db;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::RankingError;
pub use indicators::{IndicatorConfig, Reducer, ScoreSource, TiePolicy};
pub use services::{RankingEngine, RankingOutcome, ScoreAggregator};
