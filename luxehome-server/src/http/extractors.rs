//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::{FromRequestParts, Path};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use luxehome_core::ValidationError;

use super::error::ApiError;
use crate::baas::AuthUser;
use crate::state::AppState;

/// Bearer token from the Authorization header, if any.
fn bearer(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Signed-in agent; rejects with 401 otherwise
pub struct AuthAgent(pub AuthUser);

impl AuthAgent {
    pub fn id(&self) -> Uuid {
        self.0.id
    }
}

impl FromRequestParts<Arc<AppState>> for AuthAgent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer(parts).ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;
        let user = state.auth.verify(token).await?;
        Ok(Self(user))
    }
}

/// Signed-in agent when a valid session is present
///
/// An invalid or expired token is treated as anonymous.
pub struct MaybeAgent(pub Option<AuthUser>);

impl FromRequestParts<Arc<AppState>> for MaybeAgent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer(parts) else {
            return Ok(Self(None));
        };
        match state.auth.verify(token).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unusable session");
                Ok(Self(None))
            }
        }
    }
}

/// Extract and validate a UUID from path
pub struct ValidUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidUuid
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let uuid = Uuid::parse_str(&id).map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "invalid UUID format",
            })
        })?;

        Ok(Self(uuid))
    }
}
