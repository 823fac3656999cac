//! AI assist endpoints for the listing editor

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use luxehome_core::scoring::DescriptionParams;
use luxehome_core::Amenities;

use crate::ai;
use crate::http::error::ApiError;
use crate::http::extractors::AuthAgent;
use crate::http::upload::read_single_image;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

#[derive(Serialize)]
pub struct AnalyzeImageResponse {
    pub amenities: Amenities,
}

/// POST /api/ai/description
async fn generate_description(
    State(state): State<Arc<AppState>>,
    _agent: AuthAgent,
    Json(params): Json<DescriptionParams>,
) -> Json<DescriptionResponse> {
    let description = ai::generate_description(state.model.as_ref(), &params).await;
    Json(DescriptionResponse { description })
}

/// POST /api/ai/analyze-image (multipart `image`)
async fn analyze_image(
    State(state): State<Arc<AppState>>,
    _agent: AuthAgent,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeImageResponse>, ApiError> {
    let image = read_single_image(&mut multipart).await?;
    let amenities = ai::analyze_image(state.model.as_ref(), &image.bytes, &image.content_type).await;
    tracing::debug!(detected = amenities.len(), "image analyzed");
    Ok(Json(AnalyzeImageResponse { amenities }))
}

/// AI routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai/description", post(generate_description))
        .route("/api/ai/analyze-image", post(analyze_image))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{self, AGENT_TOKEN};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn description_from_model() {
        let app = test_support::app(test_support::state("Wake to the sound of surf."));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/description")
                    .header("authorization", format!("Bearer {AGENT_TOKEN}"))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "title": "Surf House",
                            "location": "Malibu, CA",
                            "stats": "4 beds, 3 baths, 3200 sqft",
                            "amenities": ["oceanView"]
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["description"], "Wake to the sound of surf.");
    }

    #[tokio::test]
    async fn analyze_image_filters_to_catalogue() {
        let boundary = "img-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"deck.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let app = test_support::app(test_support::state(
            r#"{"infinityPool": true, "hotTub": true}"#,
        ));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/analyze-image")
                    .header("authorization", format!("Bearer {AGENT_TOKEN}"))
                    .header("content-type", format!("multipart/form-data; boundary={boundary}"))
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"amenities": {"infinityPool": true}}));
    }

    #[tokio::test]
    async fn analyze_image_without_file_is_400() {
        let boundary = "img-boundary";
        let body = format!("--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nx\r\n--{boundary}--\r\n");
        let app = test_support::app(test_support::state("{}"));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/analyze-image")
                    .header("authorization", format!("Bearer {AGENT_TOKEN}"))
                    .header("content-type", format!("multipart/form-data; boundary={boundary}"))
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
