pub mod ranking_batch;

pub use ranking_batch::{BatchJobStats, RankingBatchJob};
