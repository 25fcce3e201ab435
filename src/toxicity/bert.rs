// Remote BERT classifier client.
//
// The service takes one batch per POST and returns an ordered result
// list aligned with the submitted texts. Any transport failure, non-2xx
// status, malformed body, or length mismatch fails the whole batch —
// the orchestrator decides what that costs the overall request.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{ScoreResult, ToxicityScorer};

/// Client for the batch toxicity scoring service.
pub struct BertScorer {
    client: Client,
    endpoint: String,
    max_seq_length: u32,
}

impl BertScorer {
    /// Create a scorer pointed at the given service endpoint.
    pub fn new(endpoint: &str, max_seq_length: u32) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            max_seq_length,
        }
    }
}

#[async_trait]
impl ToxicityScorer for BertScorer {
    async fn score_batch(&self, texts: &[String]) -> Result<Vec<ScoreResult>> {
        // Nothing to classify, skip the round-trip.
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = BertRequest {
            description: texts,
            max_seq_length: self.max_seq_length,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .json(&request)
            .send()
            .await
            .context("Failed to call scoring service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Scoring service returned {status}: {body}");
        }

        let result: BertResponse = response
            .json()
            .await
            .context("Failed to parse scoring service response")?;

        if result.results.len() != texts.len() {
            anyhow::bail!(
                "Scoring service returned {} results for {} texts",
                result.results.len(),
                texts.len()
            );
        }

        debug!(batch = texts.len(), "Scored batch");

        Ok(result.results)
    }
}

// --- Scoring service request/response types ---

#[derive(Serialize)]
struct BertRequest<'a> {
    description: &'a [String],
    max_seq_length: u32,
}

#[derive(Deserialize)]
struct BertResponse {
    results: Vec<ScoreResult>,
}
