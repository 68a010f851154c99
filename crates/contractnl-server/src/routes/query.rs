//! Query routes: full pipeline, intent only, and service status.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/query", post(process_query))
        .route("/query/intent", post(classify_query))
        .route("/query/status", get(get_status))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(alias = "text")]
    pub query: String,
}

/// POST /api/query. Runs the full pipeline. Blocked queries are still a 200:
/// the caller reads `errors` to decide what to show.
async fn process_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    let result = state.processor.process(&req.query);
    state.record(&result);
    info!(
        action = %result.query_metadata.action_type,
        blocked = result.has_blocker(),
        "Query served"
    );
    (StatusCode::OK, Json(result))
}

/// POST /api/query/intent
async fn classify_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    Json(state.processor.classify_intent(&req.query))
}

/// GET /api/query/status
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.stats();
    Json(serde_json::json!({
        "status": "ok",
        "startedAt": state.started_at.to_rfc3339(),
        "spellCorrection": state.config.pipeline.spell_correction,
        "queriesProcessed": stats.queries_processed,
        "queriesRouted": stats.queries_routed,
        "queriesFailed": stats.queries_failed,
    }))
}
