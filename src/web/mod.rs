// Web server — Axum-based request handler for the gateway.
//
// One real route: POST / runs a full aggregation pass with the caller's
// credentials and returns the merged results. Validation failures are
// rejected before any fetch or score work starts.

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
///
/// Holds only process-level config; caller credentials live in the
/// request and die with it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Start the web server and block until it exits.
pub async fn run_server(config: Config, bind: &str, port: u16) -> Result<()> {
    let state = AppState {
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Skimmer gateway listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router. Public so tests can drive it without a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::clean_timeline))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Deployment health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
