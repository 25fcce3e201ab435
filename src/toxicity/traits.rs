// Toxicity scorer trait — the swap-ready abstraction.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One classification outcome for one post's cleaned text.
///
/// The classifier's result schema belongs to the scoring service, so
/// it passes through untouched rather than being pinned down here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreResult(pub serde_json::Value);

/// Trait for scoring a batch of texts. Implementations must return
/// exactly one result per input text, in input order — positional
/// alignment is the only join key the pipeline has.
#[async_trait]
pub trait ToxicityScorer: Send + Sync {
    /// Score `texts`, returning results aligned with the input. A
    /// failure covers the whole batch; a partial-length result is
    /// never produced.
    async fn score_batch(&self, texts: &[String]) -> Result<Vec<ScoreResult>>;
}
