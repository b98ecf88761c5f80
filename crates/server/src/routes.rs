//! HTTP surface: `POST /api/summarize` and `GET /healthz`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gist_core::{ErrorKind, GistError, Pipeline, SummaryResult, TargetSet, parse_article_url};
use serde::Deserialize;
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Target set used when the request omits `mode`
    pub default_mode: TargetSet,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub url: String,
    #[serde(default)]
    pub mode: Option<String>,
}

/// Error body: `{"detail": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn unprocessable(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, detail: detail.into() }
    }
}

impl From<GistError> for ApiError {
    fn from(err: GistError) -> Self {
        match err.kind() {
            ErrorKind::Extraction | ErrorKind::ContentTooShort => Self::unprocessable(err.to_string()),
            ErrorKind::CapabilityUnavailable => {
                Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail: err.to_string() }
            }
            ErrorKind::Unknown => {
                tracing::error!(error = %err, "summarization failed");
                Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail: "generic processing error".to_string() }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Summarize an article
///
/// POST /api/summarize
async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummaryResult>, ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::unprocessable("url must not be empty"));
    }
    parse_article_url(url)?;

    let mode = match request.mode.as_deref() {
        Some(mode) => mode.parse::<TargetSet>().map_err(ApiError::unprocessable)?,
        None => state.default_mode,
    };

    tracing::info!(url, ?mode, "summarize request");

    let result = state.pipeline.run(url, &mode.targets()).await?;
    Ok(Json(result))
}

/// GET /healthz
async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
