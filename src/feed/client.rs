// Feed API client — thin reqwest wrapper over the v1.1-style timeline
// endpoints.
//
// App credentials come from config; the caller's access token/secret
// are threaded in per request, never held in process-wide state.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::traits::TimelineSource;
use super::Post;

/// Per-request access credentials supplied by the caller.
#[derive(Debug, Clone)]
pub struct AccessTokens {
    pub token: String,
    pub secret: String,
}

/// HTTP client for the timeline/mentions feed API.
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
    access: AccessTokens,
}

impl FeedClient {
    /// Create a client bound to one caller's credentials.
    pub fn new(
        base_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        access: AccessTokens,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("skimmer/0.1 (timeline-toxicity-gateway)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            access,
        })
    }

    /// GET a feed endpoint and deserialize the JSON response.
    ///
    /// `path` is relative to the base URL (e.g.
    /// "/1.1/statuses/home_timeline.json"); `params` are query pairs.
    async fn feed_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        debug!(path = path, "Feed GET request");

        // Request signing happens at the gateway boundary; the key
        // material is forwarded in the OAuth authorization header.
        let authorization = format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_consumer_secret=\"{}\", \
             oauth_token=\"{}\", oauth_token_secret=\"{}\"",
            self.consumer_key, self.consumer_secret, self.access.token, self.access.secret,
        );

        let response = self
            .client
            .get(&url)
            .query(params)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .with_context(|| format!("Feed request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Feed API {path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }

    async fn try_fetch_home_page(&self, page: usize, count: usize) -> Result<Vec<Post>> {
        let count = count.to_string();
        // The v1.1 `page` parameter is 1-based.
        let page = (page + 1).to_string();
        let items: Vec<TimelineItem> = self
            .feed_get(
                "/1.1/statuses/home_timeline.json",
                &[
                    ("count", &count),
                    ("page", &page),
                    ("tweet_mode", "extended"),
                    ("include_rts", "true"),
                ],
            )
            .await?;
        Ok(items.into_iter().map(TimelineItem::into_post).collect())
    }

    async fn try_fetch_mentions(&self, count: usize) -> Result<Vec<Post>> {
        let count = count.to_string();
        let items: Vec<TimelineItem> = self
            .feed_get(
                "/1.1/statuses/mentions_timeline.json",
                &[
                    ("count", &count),
                    ("tweet_mode", "extended"),
                    ("include_rts", "true"),
                ],
            )
            .await?;
        Ok(items.into_iter().map(TimelineItem::into_post).collect())
    }
}

#[async_trait]
impl TimelineSource for FeedClient {
    async fn fetch_home_page(&self, page: usize, count: usize) -> Vec<Post> {
        match self.try_fetch_home_page(page, count).await {
            Ok(posts) => {
                debug!(page = page, count = posts.len(), "Fetched home-timeline page");
                posts
            }
            Err(e) => {
                warn!(page = page, error = %e, "Home-timeline fetch failed, contributing nothing");
                Vec::new()
            }
        }
    }

    async fn fetch_mentions(&self, count: usize) -> Vec<Post> {
        match self.try_fetch_mentions(count).await {
            Ok(posts) => {
                debug!(count = posts.len(), "Fetched mentions timeline");
                posts
            }
            Err(e) => {
                warn!(error = %e, "Mentions fetch failed, contributing nothing");
                Vec::new()
            }
        }
    }
}

// -- Serde types for the timeline endpoints --

#[derive(Deserialize)]
struct TimelineItem {
    full_text: String,
    id_str: String,
    user: FeedUser,
}

#[derive(Deserialize)]
struct FeedUser {
    id: i64,
    name: String,
}

impl TimelineItem {
    fn into_post(self) -> Post {
        Post::new(self.user.id, self.user.name, self.id_str, self.full_text)
    }
}
