use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use deskflow_core::types::WorkflowResult;
use deskflow_engine::ServiceState;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SupportRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub openai_configured: bool,
}

// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ready = state.service.is_ready();
    Json(HealthResponse {
        status: if ready { "healthy" } else { "degraded" },
        openai_configured: ready,
    })
}

// POST /support
//
// A malformed request (empty query) is rejected before entering the
// workflow. An unready service is a 500; a per-request workflow failure is
// a 200 with success=false.
pub async fn support(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SupportRequest>,
) -> Result<Json<WorkflowResult>, (StatusCode, Json<serde_json::Value>)> {
    if body.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "query must not be empty" })),
        ));
    }

    match &state.service {
        ServiceState::Ready(service) => Ok(Json(service.handle(&body.query).await)),
        ServiceState::NotReady { reason } => {
            warn!(reason = %reason, "Support request while workflow not initialized");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Workflow not initialized" })),
            ))
        }
    }
}

// GET / — capability listing
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Customer Support Agent Demo API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "support": "/support",
        }
    }))
}
