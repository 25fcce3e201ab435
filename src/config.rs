use std::env;

use anyhow::Result;

/// Default capacity of one scoring batch (and one timeline page).
pub const DEFAULT_BATCH_SIZE: usize = 32;
/// Default ceiling on concurrently running fetch/score tasks.
pub const DEFAULT_CONCURRENCY: usize = 20;
/// Default number of mentions requested per aggregation run.
pub const DEFAULT_MENTIONS_COUNT: usize = 200;
/// Fixed model parameter sent with every scoring request.
pub const DEFAULT_MAX_SEQ_LENGTH: u32 = 32;

/// Default public endpoint for the feed source API.
pub const DEFAULT_FEED_API_URL: &str = "https://api.twitter.com";

/// Central configuration loaded from environment variables.
///
/// App-level feed credentials (consumer key/secret) live here; the
/// caller's access token/secret arrive with each request and are never
/// stored. The .env file is loaded at startup via dotenvy.
pub struct Config {
    pub consumer_key: String,
    pub consumer_secret: String,
    /// Base URL of the timeline/mentions feed API.
    pub feed_api_url: String,
    /// Endpoint of the BERT toxicity scoring service.
    pub scorer_url: String,
    /// Posts per scoring batch (mentions partition size).
    pub batch_size: usize,
    /// Posts requested per home-timeline page.
    pub page_size: usize,
    /// Mentions requested per aggregation run.
    pub mentions_count: usize,
    /// Worker-pool ceiling for concurrent fetch/score tasks.
    pub concurrency: usize,
    /// `max_seq_length` parameter forwarded to the scorer.
    pub max_seq_length: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Credentials and the scorer URL have no defaults — call
    /// `require_credentials` / `require_scorer` before serving.
    pub fn load() -> Result<Self> {
        Ok(Self {
            consumer_key: env::var("TWITTER_CONSUMER_KEY").unwrap_or_default(),
            consumer_secret: env::var("TWITTER_CONSUMER_SECRET").unwrap_or_default(),
            feed_api_url: env::var("FEED_API_URL")
                .unwrap_or_else(|_| DEFAULT_FEED_API_URL.to_string()),
            scorer_url: env::var("SCORER_URL").unwrap_or_default(),
            batch_size: env_usize("SKIMMER_BATCH_SIZE", DEFAULT_BATCH_SIZE),
            page_size: env_usize("SKIMMER_PAGE_SIZE", DEFAULT_BATCH_SIZE),
            mentions_count: env_usize("SKIMMER_MENTIONS_COUNT", DEFAULT_MENTIONS_COUNT),
            concurrency: env_usize("SKIMMER_CONCURRENCY", DEFAULT_CONCURRENCY),
            max_seq_length: env::var("SKIMMER_MAX_SEQ_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SEQ_LENGTH),
        })
    }

    /// Check that the app-level feed credentials are configured.
    pub fn require_credentials(&self) -> Result<()> {
        if self.consumer_key.is_empty() || self.consumer_secret.is_empty() {
            anyhow::bail!(
                "TWITTER_CONSUMER_KEY / TWITTER_CONSUMER_SECRET not set. \
                 Add them to your .env file."
            );
        }
        Ok(())
    }

    /// Check that the scoring service endpoint is configured.
    pub fn require_scorer(&self) -> Result<()> {
        if self.scorer_url.is_empty() {
            anyhow::bail!("SCORER_URL not set. Add it to your .env file.");
        }
        Ok(())
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
