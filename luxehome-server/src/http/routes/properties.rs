//! Property endpoints: public listings and detail, agent inventory and edits

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use luxehome_core::amenities;
use luxehome_core::filters::{ListingQuery, PropertyFilters};
use luxehome_core::gallery::{self, FALLBACK_IMAGE, GALLERY_SIZE};
use luxehome_core::models::ListingType;

use crate::baas::storage::property_image_path;
use crate::baas::PROPERTY_BUCKET;
use crate::db::repos::{Profile, ProfileRepo, Property, PropertyPage, PropertyRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AuthAgent, ValidUuid};
use crate::http::upload::{read_property_form, PropertySubmission, UploadedFile};
use crate::state::AppState;

/// Listings shown under "similar properties"
const SIMILAR_LISTINGS: i64 = 3;

const AGENT_NAME_FALLBACK: &str = "Listing Agent";
const AGENT_PHONE_FALLBACK: &str = "Contact for details";

/// Contact card on the detail page
#[derive(Debug, Serialize, PartialEq)]
pub struct AgentCard {
    pub name: String,
    pub image: Option<String>,
    pub phone: String,
}

impl AgentCard {
    fn from_profile(profile: Option<&Profile>) -> Self {
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Self {
            name: profile
                .and_then(|p| non_blank(&p.full_name))
                .unwrap_or_else(|| AGENT_NAME_FALLBACK.to_string()),
            image: profile.and_then(|p| non_blank(&p.avatar_url)),
            phone: profile
                .and_then(|p| non_blank(&p.phone))
                .unwrap_or_else(|| AGENT_PHONE_FALLBACK.to_string()),
        }
    }
}

/// Detail page payload
#[derive(Debug, Serialize)]
pub struct PropertyDetail {
    pub property: Property,
    /// Five display URLs
    pub images: Vec<String>,
    pub amenity_labels: Vec<&'static str>,
    /// `Sale` for legacy rows without a listing type
    pub listing_type: ListingType,
    pub agent: AgentCard,
    pub similar: Vec<Property>,
}

impl PropertyDetail {
    fn new(property: Property, agent: Option<&Profile>, similar: Vec<Property>) -> Self {
        let amenity_labels = property
            .amenities
            .as_ref()
            .map(amenities::from_legacy)
            .map(|map| {
                amenities::active(&map)
                    .into_iter()
                    .map(amenities::label_for)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            images: gallery::decode(property.image.as_deref()),
            amenity_labels,
            listing_type: ListingType::from_column(property.listing_type.as_deref()),
            agent: AgentCard::from_profile(agent),
            similar,
            property,
        }
    }
}

/// Real photos in a stored gallery, ignoring fallback padding.
fn stored_image_count(raw: Option<&str>) -> usize {
    gallery::decode(raw)
        .iter()
        .filter(|url| url.as_str() != FALLBACK_IMAGE)
        .count()
}

/// Upload listing photos; URLs come back in field order.
///
/// Only the first `GALLERY_SIZE` files are stored, the gallery keeps no more.
async fn upload_images(state: &AppState, mut images: Vec<UploadedFile>) -> Result<Vec<String>, ApiError> {
    images.truncate(GALLERY_SIZE);
    let millis = Utc::now().timestamp_millis();
    let mut urls = Vec::with_capacity(images.len());

    for image in images {
        let path = property_image_path(millis, image.index, &image.filename);
        let url = state
            .storage
            .upload(PROPERTY_BUCKET, &path, image.bytes, &image.content_type, false)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path = %path, "image upload failed");
                ApiError::from(e)
            })?;
        urls.push(url);
    }

    Ok(urls)
}

/// GET /api/properties - public listing search
///
/// A failed query is logged and answered with an empty page.
async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<PropertyFilters>,
) -> Result<Json<PropertyPage>, ApiError> {
    let query = filters.to_query()?;

    match PropertyRepo::new(&state.pool).list(&query).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            tracing::error!(error = %e, "listing query failed");
            Ok(Json(PropertyPage::default()))
        }
    }
}

/// GET /api/properties/{id} - detail view
async fn get_property(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<PropertyDetail>, ApiError> {
    let repo = PropertyRepo::new(&state.pool);
    let property = repo.get(id).await?;

    let agent = match property.user_id {
        Some(owner) => ProfileRepo::new(&state.pool)
            .find(owner)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, %owner, "agent profile lookup failed");
                None
            }),
        None => None,
    };

    let similar = repo.similar(id, SIMILAR_LISTINGS).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "similar listings lookup failed");
        Vec::new()
    });

    Ok(Json(PropertyDetail::new(property, agent.as_ref(), similar)))
}

/// POST /api/properties - create a listing (multipart)
async fn create_property(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let PropertySubmission { form, images } = read_property_form(&mut multipart).await?;
    let input = form.validate(images.len())?;

    let urls = upload_images(&state, images).await?;
    let property = PropertyRepo::new(&state.pool)
        .create(agent.id(), &input, &gallery::encode(&urls))
        .await?;

    tracing::info!(id = %property.id, agent = %agent.id(), status = %input.status, "property created");
    Ok((StatusCode::CREATED, Json(property)))
}

/// PUT /api/properties/{id} - edit one of the agent's listings (multipart)
///
/// New photos replace the gallery; without any the stored gallery stays.
async fn update_property(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    agent: AuthAgent,
    mut multipart: Multipart,
) -> Result<Json<Property>, ApiError> {
    let repo = PropertyRepo::new(&state.pool);
    let existing = repo.get(id).await?;
    if existing.user_id != Some(agent.id()) {
        return Err(ApiError::forbidden(
            "Unauthorized: You can only edit your own properties",
        ));
    }

    let PropertySubmission { form, images } = read_property_form(&mut multipart).await?;
    let image_count = if images.is_empty() {
        stored_image_count(existing.image.as_deref())
    } else {
        images.len()
    };
    let input = form.validate(image_count)?;

    let image = if images.is_empty() {
        None
    } else {
        Some(gallery::encode(&upload_images(&state, images).await?))
    };

    let property = repo.update(agent.id(), id, &input, image.as_deref()).await?;
    tracing::info!(%id, agent = %agent.id(), "property updated");
    Ok(Json(property))
}

/// DELETE /api/properties/{id}
async fn delete_property(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    agent: AuthAgent,
) -> Result<StatusCode, ApiError> {
    PropertyRepo::new(&state.pool).delete(agent.id(), id).await?;
    tracing::info!(%id, agent = %agent.id(), "property deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/properties - the agent's inventory, every status
async fn list_inventory(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> Result<Json<Vec<Property>>, ApiError> {
    let page = PropertyRepo::new(&state.pool)
        .list(&ListingQuery::owned_by(agent.id()))
        .await?;
    Ok(Json(page.data))
}

/// Property routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/properties", get(list_properties).post(create_property))
        .route(
            "/api/properties/{id}",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/api/admin/properties", get(list_inventory))
}
