//! Amenity catalogue for forms and the filter sidebar

use std::sync::Arc;

use axum::{routing::get, Json, Router};

use luxehome_core::{Amenity, MASTER_AMENITIES};

use crate::state::AppState;

/// GET /api/amenities
async fn catalogue() -> Json<&'static [Amenity]> {
    Json(&MASTER_AMENITIES)
}

/// Amenity routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/amenities", get(catalogue))
}

#[cfg(test)]
mod tests {
    use crate::test_support;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn lists_catalogue_in_order() {
        let app = test_support::app(test_support::state(""));
        let response = app
            .oneshot(Request::builder().uri("/api/amenities").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 19);
        assert_eq!(entries[0]["key"], "pool");
        assert_eq!(entries[0]["category"], "wellness");
        assert_eq!(entries[18]["label"], "Gated Community");
    }
}
