//! Agent profile endpoints

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::baas::storage::avatar_path;
use crate::baas::AVATAR_BUCKET;
use crate::db::repos::{Profile, ProfileRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AuthAgent, ValidUuid};
use crate::http::upload::{read_profile_form, ProfileSubmission};
use crate::state::AppState;

/// GET /api/admin/profile - the caller's profile, blank if never saved
async fn current_profile(
    State(state): State<Arc<AppState>>,
    AuthAgent(user): AuthAgent,
) -> Result<Json<Profile>, ApiError> {
    let profile = ProfileRepo::new(&state.pool)
        .find(user.id)
        .await?
        .unwrap_or_else(|| Profile::blank(user.id, user.email.clone()));
    Ok(Json(profile))
}

/// PUT /api/admin/profile - save settings, optionally with a new avatar
async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthAgent(user): AuthAgent,
    mut multipart: Multipart,
) -> Result<Json<Profile>, ApiError> {
    let ProfileSubmission { form, avatar } = read_profile_form(&mut multipart).await?;
    let mut input = form.validate()?;

    if let Some(file) = avatar {
        let path = avatar_path(user.id, Utc::now().timestamp_millis());
        let url = state
            .storage
            .upload(AVATAR_BUCKET, &path, file.bytes, &file.content_type, true)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path = %path, "avatar upload failed");
                ApiError::from(e)
            })?;
        input.avatar_url = Some(url);
    }

    let profile = ProfileRepo::new(&state.pool).upsert(user.id, &input).await?;
    tracing::info!(user = %user.id, "profile updated");
    Ok(Json(profile))
}

/// GET /api/profiles/{id} - public agent profile
async fn get_profile(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Profile>, ApiError> {
    let profile = ProfileRepo::new(&state.pool).get(id).await?;
    Ok(Json(profile))
}

/// Profile routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/admin/profile",
            get(current_profile).put(update_profile),
        )
        .route("/api/profiles/{id}", get(get_profile))
}
