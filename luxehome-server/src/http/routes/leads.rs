//! Lead endpoints: public contact form and the agent's pipeline

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use luxehome_core::models::{LeadForm, LeadStatus};

use crate::ai;
use crate::db::repos::{Lead, LeadRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AuthAgent, MaybeAgent, ValidUuid};
use crate::state::AppState;

/// Status change request
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub status: LeadStatus,
}

/// POST /api/leads - contact form submission
///
/// Without an explicit agent the lead goes to the signed-in caller, if any.
async fn create_lead(
    State(state): State<Arc<AppState>>,
    MaybeAgent(caller): MaybeAgent,
    Json(form): Json<LeadForm>,
) -> Result<(StatusCode, Json<Lead>), ApiError> {
    let mut input = form.validate()?;
    if input.agent_id.is_none() {
        input.agent_id = caller.map(|user| user.id);
    }

    let score = ai::score_lead(state.model.as_ref(), &input.message).await;
    let lead = LeadRepo::new(&state.pool).create(&input, score).await?;

    tracing::info!(id = %lead.id, score, agent = ?lead.agent_id, "lead captured");
    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/admin/leads
async fn list_leads(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> Result<Json<Vec<Lead>>, ApiError> {
    let leads = LeadRepo::new(&state.pool).list_for_agent(agent.id()).await?;
    Ok(Json(leads))
}

/// PATCH /api/admin/leads/{id}
async fn update_lead_status(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    agent: AuthAgent,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    let status: LeadStatus = req.status.parse()?;

    let updated = LeadRepo::new(&state.pool)
        .update_status(agent.id(), id, status)
        .await?;
    if !updated {
        return Err(ApiError::forbidden(
            "Unauthorized: Lead not found or access denied",
        ));
    }

    tracing::info!(%id, %status, "lead status updated");
    Ok(Json(UpdateStatusResponse {
        success: true,
        status,
    }))
}

/// DELETE /api/admin/leads/{id}
async fn delete_lead(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    agent: AuthAgent,
) -> Result<StatusCode, ApiError> {
    LeadRepo::new(&state.pool).delete(agent.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lead routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leads", post(create_lead))
        .route("/api/admin/leads", get(list_leads))
        .route(
            "/api/admin/leads/{id}",
            patch(update_lead_status).delete(delete_lead),
        )
}
