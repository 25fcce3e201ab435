// Composition tests for the fan-out/fan-in orchestrator.
//
// These exercise the planning, batching, and fault-isolation behavior
// with in-memory trait implementations — no network, no server.

use std::sync::Mutex;

use async_trait::async_trait;
use skimmer::feed::{Post, TimelineSource};
use skimmer::pipeline::{aggregate, PipelineOptions};
use skimmer::toxicity::{ScoreResult, ToxicityScorer};

fn post(id: u32) -> Post {
    Post::new(
        id as i64,
        format!("user{id}"),
        id.to_string(),
        format!("post number {id}"),
    )
}

fn opts() -> PipelineOptions {
    PipelineOptions {
        batch_size: 32,
        page_size: 32,
        mentions_count: 200,
        concurrency: 20,
    }
}

/// Canned feed: `home[i]` is page i, mentions served up to `count`.
struct StubFeed {
    home: Vec<Vec<Post>>,
    mentions: Vec<Post>,
    pages_requested: Mutex<Vec<usize>>,
}

impl StubFeed {
    fn new(home: Vec<Vec<Post>>, mentions: Vec<Post>) -> Self {
        Self {
            home,
            mentions,
            pages_requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TimelineSource for StubFeed {
    async fn fetch_home_page(&self, page: usize, _count: usize) -> Vec<Post> {
        self.pages_requested.lock().unwrap().push(page);
        self.home.get(page).cloned().unwrap_or_default()
    }

    async fn fetch_mentions(&self, count: usize) -> Vec<Post> {
        self.mentions.iter().take(count).cloned().collect()
    }
}

/// Scorer that echoes each text back and records batch sizes.
struct EchoScorer {
    batch_sizes: Mutex<Vec<usize>>,
}

impl EchoScorer {
    fn new() -> Self {
        Self {
            batch_sizes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ToxicityScorer for EchoScorer {
    async fn score_batch(&self, texts: &[String]) -> anyhow::Result<Vec<ScoreResult>> {
        self.batch_sizes.lock().unwrap().push(texts.len());
        Ok(texts
            .iter()
            .map(|t| ScoreResult(serde_json::json!({ "echo": t })))
            .collect())
    }
}

/// Scorer that fails any batch containing the marker text.
struct FlakyScorer {
    marker: String,
}

#[async_trait]
impl ToxicityScorer for FlakyScorer {
    async fn score_batch(&self, texts: &[String]) -> anyhow::Result<Vec<ScoreResult>> {
        if texts.iter().any(|t| t.contains(&self.marker)) {
            anyhow::bail!("scoring service unavailable");
        }
        Ok(texts
            .iter()
            .map(|_| ScoreResult(serde_json::json!({ "toxic": 0.0 })))
            .collect())
    }
}

// ============================================================
// Planning: pages and mention partitions
// ============================================================

#[tokio::test]
async fn single_page_no_mentions() {
    let feed = StubFeed::new(vec![(0..5).map(post).collect()], Vec::new());
    let scorer = EchoScorer::new();

    let response = aggregate(&feed, &scorer, 1, &opts()).await;

    assert_eq!(response.results.len(), 5);
    assert_eq!(*feed.pages_requested.lock().unwrap(), vec![0]);
    // One home task, zero mention batches.
    assert_eq!(*scorer.batch_sizes.lock().unwrap(), vec![5]);
}

#[tokio::test]
async fn seventy_mentions_become_three_batches() {
    let feed = StubFeed::new(Vec::new(), (0..70).map(post).collect());
    let scorer = EchoScorer::new();

    let response = aggregate(&feed, &scorer, 0, &opts()).await;

    assert_eq!(response.results.len(), 70);
    let mut sizes = scorer.batch_sizes.lock().unwrap().clone();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![6, 32, 32]);
}

#[tokio::test]
async fn every_requested_page_is_fetched() {
    let feed = StubFeed::new(
        vec![
            (0..3).map(post).collect(),
            (10..13).map(post).collect(),
            (20..23).map(post).collect(),
        ],
        Vec::new(),
    );
    let scorer = EchoScorer::new();

    let response = aggregate(&feed, &scorer, 3, &opts()).await;

    assert_eq!(response.results.len(), 9);
    let mut pages = feed.pages_requested.lock().unwrap().clone();
    pages.sort_unstable();
    assert_eq!(pages, vec![0, 1, 2]);
}

#[tokio::test]
async fn missing_page_contributes_nothing() {
    // Two pages requested, the feed only has one.
    let feed = StubFeed::new(vec![(0..4).map(post).collect()], Vec::new());
    let scorer = EchoScorer::new();

    let response = aggregate(&feed, &scorer, 2, &opts()).await;

    assert_eq!(response.results.len(), 4);
    // The empty page never reaches the scorer.
    assert_eq!(*scorer.batch_sizes.lock().unwrap(), vec![4]);
}

// ============================================================
// Fault isolation
// ============================================================

#[tokio::test]
async fn one_failing_batch_keeps_sibling_results() {
    let feed = StubFeed::new(
        vec![
            (0..3).map(post).collect(),
            vec![Post::new(99, "user99".into(), "99".into(), "poison pill".into())],
        ],
        Vec::new(),
    );
    let scorer = FlakyScorer {
        marker: "poison".into(),
    };

    let response = aggregate(&feed, &scorer, 2, &opts()).await;

    // The poisoned page drops; the healthy page survives in full.
    assert_eq!(response.results.len(), 3);
}

#[tokio::test]
async fn failing_mention_batch_keeps_home_results() {
    let mut mentions: Vec<Post> = (0..2).map(post).collect();
    mentions.push(Post::new(99, "user99".into(), "99".into(), "poison pill".into()));

    let feed = StubFeed::new(vec![(0..5).map(post).collect()], mentions);
    let scorer = FlakyScorer {
        marker: "poison".into(),
    };

    let response = aggregate(&feed, &scorer, 1, &opts()).await;

    assert_eq!(response.results.len(), 5);
}

#[tokio::test]
async fn everything_failing_still_completes() {
    let feed = StubFeed::new(Vec::new(), Vec::new());
    let scorer = FlakyScorer { marker: "".into() };

    let response = aggregate(&feed, &scorer, 3, &opts()).await;

    assert!(response.results.is_empty());
}

// ============================================================
// Positional alignment and pass-through behavior
// ============================================================

#[tokio::test]
async fn each_result_is_paired_with_its_own_post() {
    let feed = StubFeed::new(
        vec![(0..10).map(post).collect()],
        (100..150).map(post).collect(),
    );
    let scorer = EchoScorer::new();

    let response = aggregate(&feed, &scorer, 1, &opts()).await;

    assert_eq!(response.results.len(), 60);
    for scored in &response.results {
        assert_eq!(
            scored.bert_result.0["echo"],
            serde_json::json!(scored.tweet.cleaned_text)
        );
    }
}

#[tokio::test]
async fn empty_cleaned_text_is_still_scored() {
    // An emoji-only post cleans to the empty string but is submitted
    // like any other.
    let feed = StubFeed::new(
        vec![vec![Post::new(1, "user1".into(), "1".into(), "😀".into())]],
        Vec::new(),
    );
    let scorer = EchoScorer::new();

    let response = aggregate(&feed, &scorer, 1, &opts()).await;

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].tweet.cleaned_text, "");
    assert_eq!(response.results[0].bert_result.0["echo"], serde_json::json!(""));
}

#[tokio::test]
async fn small_batch_size_partitions_mentions() {
    let feed = StubFeed::new(Vec::new(), (0..7).map(post).collect());
    let scorer = EchoScorer::new();

    let options = PipelineOptions {
        batch_size: 3,
        ..opts()
    };
    let response = aggregate(&feed, &scorer, 0, &options).await;

    assert_eq!(response.results.len(), 7);
    let mut sizes = scorer.batch_sizes.lock().unwrap().clone();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 3, 3]);
}
