//! JSON HTTP surface over the explorer pipeline.

use anyhow::Result;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::environment::Config;
use crate::error::ExplorerError;
use crate::explorer::{Explorer, SearchResults, TrialDetail, TrialView, DEFAULT_DISPLAY_COUNT};
use crate::news::NewsItem;
use crate::TARGET_API;

type AppState = Arc<Explorer>;

/// Query string for `/api/trials`.
#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

/// Maps library errors onto HTTP status codes.
struct ApiError(ExplorerError);

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ExplorerError::InvalidNctId(_) | ExplorerError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ExplorerError::NotFound(_) => StatusCode::NOT_FOUND,
            ExplorerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            error!(target: TARGET_API, "Request failed: {}", self.0);
        } else {
            warn!(target: TARGET_API, "Request rejected: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn router(explorer: Arc<Explorer>) -> Router {
    Router::new()
        .route("/status", get(status_check))
        .route("/api/trials", get(search_trials))
        .route("/api/trials/{nct_id}", get(trial_detail))
        .route("/api/trials/{nct_id}/news", get(trial_news))
        .route("/api/trials/{nct_id}/view", get(trial_view))
        .with_state(explorer)
}

/// Bind the configured port and serve until Ctrl-C.
pub async fn app_api_loop(config: &Config, explorer: Explorer) -> Result<()> {
    let app = router(Arc::new(explorer));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(target: TARGET_API, "Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(target: TARGET_API, "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_err() {
        error!(target: TARGET_API, "Failed to listen for ctrl-c");
    }
}

async fn status_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "version": env!("CARGO_PKG_VERSION"),
        "build_timestamp": option_env!("BUILD_TIMESTAMP"),
        "git_hash": option_env!("GIT_HASH"),
    }))
}

async fn search_trials(
    State(explorer): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Query(params) = params.map_err(|e| ExplorerError::InvalidRequest(e.body_text()))?;
    info!(target: TARGET_API, "GET /api/trials q={:?} limit={:?}", params.q, params.limit);
    let results = explorer
        .search(&params.q, params.limit.unwrap_or(DEFAULT_DISPLAY_COUNT))
        .await?;
    Ok(Json(results))
}

async fn trial_detail(
    State(explorer): State<AppState>,
    Path(nct_id): Path<String>,
) -> Result<Json<TrialDetail>, ApiError> {
    info!(target: TARGET_API, "GET /api/trials/{}", nct_id);
    let trial = explorer.trial(&nct_id).await?;
    Ok(Json(TrialDetail::from(&trial)))
}

async fn trial_news(
    State(explorer): State<AppState>,
    Path(nct_id): Path<String>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    info!(target: TARGET_API, "GET /api/trials/{}/news", nct_id);
    let trial = explorer.trial(&nct_id).await?;
    Ok(Json(explorer.related_news(&trial).await))
}

async fn trial_view(
    State(explorer): State<AppState>,
    Path(nct_id): Path<String>,
) -> Result<Json<TrialView>, ApiError> {
    info!(target: TARGET_API, "GET /api/trials/{}/view", nct_id);
    Ok(Json(explorer.trial_view(&nct_id).await?))
}
