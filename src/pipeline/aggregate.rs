// The fan-out/fan-in orchestrator: one execution per inbound request.
//
// Plan: fetch mentions once and partition them; plan one fetch-then-score
// task per requested home-timeline page. Dispatch: run every task on a
// bounded pool (buffer_unordered). Collect: each task returns its own
// result list; the collector flattens after the join, so no accumulator
// is shared during concurrent execution. A failed task contributes
// nothing and never disturbs its siblings.
//
// There is no per-task timeout or overall deadline; a hung upstream
// call holds the request open.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::batch::into_batches;
use crate::feed::{Post, TimelineSource};
use crate::toxicity::ToxicityScorer;

use super::{AggregatedResponse, PipelineOptions, ScoredPost};

/// Fetch, score, and merge both feeds. Blocks until every task is
/// terminal; never fails — failures degrade to missing results.
pub async fn aggregate(
    feed: &dyn TimelineSource,
    scorer: &dyn ToxicityScorer,
    num_pages: usize,
    opts: &PipelineOptions,
) -> AggregatedResponse {
    // Mentions are fetched up front; home pages are fetched inside
    // their own tasks since each page is an independent unit of work.
    let mentions = feed.fetch_mentions(opts.mentions_count).await;
    let mention_batches = into_batches(mentions, opts.batch_size);

    info!(
        pages = num_pages,
        mention_batches = mention_batches.len(),
        concurrency = opts.concurrency,
        "Dispatching scoring tasks"
    );

    let mut tasks: Vec<BoxFuture<'_, Vec<ScoredPost>>> =
        Vec::with_capacity(num_pages + mention_batches.len());

    for page in 0..num_pages {
        tasks.push(
            async move {
                let posts = feed.fetch_home_page(page, opts.page_size).await;
                if posts.is_empty() {
                    return Vec::new();
                }
                score_batch(scorer, posts).await
            }
            .boxed(),
        );
    }

    for batch in mention_batches {
        tasks.push(score_batch(scorer, batch).boxed());
    }

    let collected: Vec<Vec<ScoredPost>> = stream::iter(tasks)
        .buffer_unordered(opts.concurrency.max(1))
        .collect()
        .await;

    let results: Vec<ScoredPost> = collected.into_iter().flatten().collect();

    info!(results = results.len(), "Aggregation complete");

    AggregatedResponse { results }
}

/// Score one batch and zip the results back onto the posts. Scoring
/// failures are isolated here: the batch is dropped with a warning and
/// sibling tasks keep their results.
async fn score_batch(scorer: &dyn ToxicityScorer, posts: Vec<Post>) -> Vec<ScoredPost> {
    let texts: Vec<String> = posts.iter().map(|p| p.cleaned_text.clone()).collect();

    match scorer.score_batch(&texts).await {
        // The trait guarantees one result per text, in order, so the
        // zip is the positional join.
        Ok(scores) => posts
            .into_iter()
            .zip(scores)
            .map(|(tweet, bert_result)| ScoredPost { tweet, bert_result })
            .collect(),
        Err(e) => {
            warn!(batch = posts.len(), error = %e, "Batch scoring failed, dropping batch");
            Vec::new()
        }
    }
}
