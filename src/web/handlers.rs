// POST / — run one aggregation pass and return the scored timeline.
//
// The body carries the caller's access token/secret and an optional
// page count. The content-type gate returns 405, matching the original
// gateway contract (axum's method routing already covers non-POST).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::feed::{AccessTokens, FeedClient};
use crate::pipeline::{self, PipelineOptions};
use crate::toxicity::BertScorer;
use crate::web::{api_error, AppState};

/// Inbound request body. Field names follow the original function's
/// environment-variable-style contract.
#[derive(Deserialize)]
struct TimelineRequest {
    #[serde(rename = "TWITTER_ACCESS_TOKEN")]
    access_token: String,
    #[serde(rename = "TWITTER_ACCESS_TOKEN_SECRET")]
    access_token_secret: String,
    #[serde(default)]
    num_pages: Option<u32>,
}

/// POST / — fetch both feeds, score every batch, merge, respond.
pub async fn clean_timeline(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.starts_with("application/json") {
        return api_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "content-type must be application/json",
        );
    }

    // Missing credentials surface here as a 400, before any fetch or
    // score work is planned.
    let request: TimelineRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return api_error(StatusCode::BAD_REQUEST, &format!("invalid request body: {e}"))
        }
    };

    let num_pages = request.num_pages.unwrap_or(1) as usize;

    let access = AccessTokens {
        token: request.access_token,
        secret: request.access_token_secret,
    };
    let feed = match FeedClient::new(
        &state.config.feed_api_url,
        &state.config.consumer_key,
        &state.config.consumer_secret,
        access,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build feed client");
            return api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to initialize feed client",
            );
        }
    };
    let scorer = BertScorer::new(&state.config.scorer_url, state.config.max_seq_length);
    let opts = PipelineOptions::from_config(&state.config);

    let response = pipeline::aggregate(&feed, &scorer, num_pages, &opts).await;

    Json(response).into_response()
}
