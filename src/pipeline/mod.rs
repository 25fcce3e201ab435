// Aggregation pipeline — fan-out/fan-in over fetch-and-score tasks.

use serde::Serialize;

use crate::config::Config;
use crate::feed::Post;
use crate::toxicity::ScoreResult;

pub mod aggregate;

pub use aggregate::aggregate;

/// One post paired with its classification outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPost {
    pub tweet: Post,
    pub bert_result: ScoreResult,
}

/// The complete response body: every scored post from every task, in
/// arbitrary completion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedResponse {
    pub results: Vec<ScoredPost>,
}

/// Tunables for one aggregation run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Mentions partition size (posts per scoring batch).
    pub batch_size: usize,
    /// Posts requested per home-timeline page.
    pub page_size: usize,
    /// Mentions requested up front.
    pub mentions_count: usize,
    /// Worker-pool ceiling; caps simultaneous outbound connections.
    pub concurrency: usize,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.batch_size,
            page_size: config.page_size,
            mentions_count: config.mentions_count,
            concurrency: config.concurrency,
        }
    }
}
