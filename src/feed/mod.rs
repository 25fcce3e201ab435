// Feed source — timeline and mentions retrieval.
//
// The TimelineSource trait is the seam the orchestrator works against;
// FeedClient is the HTTP implementation. Both operations degrade to an
// empty page on failure so one bad fetch never aborts a request.

use serde::Serialize;

use crate::normalize::normalize;

pub mod client;
pub mod traits;

pub use client::{AccessTokens, FeedClient};
pub use traits::TimelineSource;

/// One social-media post, as it flows through the pipeline and out in
/// the response. `cleaned_text` is scorer input only and is never
/// serialized; the raw text is what the caller gets back.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    #[serde(rename = "user_id")]
    pub author_id: i64,
    #[serde(rename = "user_name")]
    pub author_name: String,
    #[serde(rename = "tweet")]
    pub raw_text: String,
    #[serde(rename = "tweet_id")]
    pub post_id: String,
    #[serde(skip)]
    pub cleaned_text: String,
}

impl Post {
    /// Build a post from feed fields, cleaning the text immediately.
    pub fn new(author_id: i64, author_name: String, post_id: String, raw_text: String) -> Self {
        let cleaned_text = normalize(&raw_text);
        Self {
            author_id,
            author_name,
            raw_text,
            post_id,
            cleaned_text,
        }
    }
}
