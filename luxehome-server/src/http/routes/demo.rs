//! Demo data reset, triggered by a scheduler or by hand

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::DbError;
use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub secret: Option<String>,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Configured secret, or 500 when resets are disabled.
fn configured_secret(state: &AppState) -> Result<&str, ApiError> {
    state
        .reset_secret
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::NotConfigured {
            message: "Reset not configured".to_string(),
        })
}

async fn reset(state: &AppState, supplied: Option<&str>) -> Result<Json<ResetResponse>, ApiError> {
    let expected = configured_secret(state)?;
    if supplied != Some(expected) {
        tracing::warn!("demo reset rejected: bad secret");
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    sqlx::query("SELECT reset_demo_data()")
        .execute(&state.pool)
        .await
        .map_err(DbError::from)?;

    tracing::info!("demo data reset");
    Ok(Json(ResetResponse {
        success: true,
        message: "Demo data reset successfully",
        timestamp: Utc::now(),
    }))
}

/// GET /api/reset-demo?secret=...
async fn reset_get(
    State(state): State<Arc<AppState>>,
    Query(req): Query<ResetRequest>,
) -> Result<Json<ResetResponse>, ApiError> {
    configured_secret(&state)?;
    let Some(secret) = req.secret.as_deref() else {
        return Err(ApiError::bad_request("Missing secret"));
    };
    reset(&state, Some(secret)).await
}

/// POST /api/reset-demo {"secret": "..."}
///
/// The body is read as JSON whatever its content type; a body that is not
/// a JSON object is a 500 before any secret check.
async fn reset_post(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ResetResponse>, ApiError> {
    let req: ResetRequest = serde_json::from_slice(&body).map_err(|e| ApiError::Internal {
        message: format!("reset body: {e}"),
    })?;
    reset(&state, req.secret.as_deref()).await
}

/// Demo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/reset-demo", get(reset_get).post(reset_post))
}
