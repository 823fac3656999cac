//! Mortgage calculator backing the listing page widget

use std::sync::Arc;

use axum::{extract::Query, routing::get, Json, Router};

use luxehome_core::mortgage::{MortgageEstimate, MortgageParams};

use crate::http::error::ApiError;
use crate::state::AppState;

/// GET /api/mortgage?price=..&down_payment=..&interest_rate=..&term_years=..
async fn estimate(Query(params): Query<MortgageParams>) -> Result<Json<MortgageEstimate>, ApiError> {
    if !params.price.is_finite() || params.price <= 0.0 {
        return Err(ApiError::bad_request("price must be greater than 0"));
    }
    Ok(Json(params.estimate()))
}

/// Mortgage routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/mortgage", get(estimate))
}

#[cfg(test)]
mod tests {
    use crate::test_support;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = test_support::app(test_support::state(""));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    #[tokio::test]
    async fn default_terms() {
        let (status, json) = get("/api/mortgage?price=1000000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["principal"], 800000.0);
        let monthly = json["monthly_payment"].as_f64().unwrap();
        assert!((monthly - 5056.54).abs() < 0.01);
    }

    #[tokio::test]
    async fn custom_down_payment() {
        let (status, json) =
            get("/api/mortgage?price=500000&down_payment=250000&interest_rate=0&term_years=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["principal"], 250000.0);
        let monthly = json["monthly_payment"].as_f64().unwrap();
        assert!((monthly - 250000.0 / 120.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn rejects_non_positive_price() {
        let (status, _) = get("/api/mortgage?price=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
