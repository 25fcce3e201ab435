// Timeline source trait — the mockable boundary to the feed API.

use async_trait::async_trait;

use super::Post;

/// Supplies the two feeds the gateway aggregates. Implementations are
/// infallible at this boundary: a failed fetch is logged and surfaces
/// as an empty page, so the overall request still completes.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Fetch one page of the authenticated user's home timeline
    /// (0-based page index), up to `count` posts, feed order.
    async fn fetch_home_page(&self, page: usize, count: usize) -> Vec<Post>;

    /// Fetch up to `count` posts mentioning the authenticated user,
    /// feed order.
    async fn fetch_mentions(&self, count: usize) -> Vec<Post>;
}
