//! Admin dashboard summary

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::repos::{LeadRepo, Profile, ProfileRepo, PropertyRepo};
use crate::http::error::ApiError;
use crate::http::extractors::AuthAgent;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub display_name: String,
    pub active_listings: i64,
    pub total_leads: i64,
    pub new_leads: i64,
}

/// Profile name, else the login email, else "User".
fn display_name(profile: Option<&Profile>, email: Option<&str>) -> String {
    let non_blank = |s: &str| !s.trim().is_empty();
    profile
        .and_then(|p| p.full_name.as_deref())
        .filter(|s| non_blank(s))
        .or(email.filter(|s| non_blank(s)))
        .unwrap_or("User")
        .trim()
        .to_string()
}

/// GET /api/admin/dashboard
async fn dashboard(
    State(state): State<Arc<AppState>>,
    AuthAgent(user): AuthAgent,
) -> Result<Json<DashboardSummary>, ApiError> {
    let profile = ProfileRepo::new(&state.pool).find(user.id).await?;
    let active_listings = PropertyRepo::new(&state.pool).count_active(user.id).await?;
    let leads = LeadRepo::new(&state.pool).counts(user.id).await?;

    Ok(Json(DashboardSummary {
        display_name: display_name(profile.as_ref(), user.email.as_deref()),
        active_listings,
        total_leads: leads.total,
        new_leads: leads.new,
    }))
}

/// Dashboard routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/admin/dashboard", get(dashboard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_fallbacks() {
        let named = Profile {
            full_name: Some("Riley Park".into()),
            ..Profile::default()
        };
        assert_eq!(display_name(Some(&named), Some("r@p.co")), "Riley Park");
        assert_eq!(display_name(None, Some("r@p.co")), "r@p.co");
        assert_eq!(display_name(Some(&Profile::default()), None), "User");

        let blank = Profile {
            full_name: Some(" ".into()),
            ..Profile::default()
        };
        assert_eq!(display_name(Some(&blank), Some("r@p.co")), "r@p.co");
    }
}
