//! Multipart form reading for the listing, profile and photo endpoints

use axum::extract::multipart::Field;
use axum::extract::Multipart;

use luxehome_core::models::{ProfileForm, PropertyForm};

use super::error::ApiError;

/// One non-empty file from a form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Position from the `image_<i>` field name; 0 for single-file fields
    pub index: usize,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Listing form fields plus photos, ordered by index
#[derive(Debug, Default)]
pub struct PropertySubmission {
    pub form: PropertyForm,
    pub images: Vec<UploadedFile>,
}

/// Profile form fields plus an optional new avatar
#[derive(Debug, Default)]
pub struct ProfileSubmission {
    pub form: ProfileForm,
    pub avatar: Option<UploadedFile>,
}

/// Index of a photo field: `image` is 0, `image_<i>` is i.
fn image_index(name: &str) -> Option<usize> {
    if name == "image" {
        return Some(0);
    }
    name.strip_prefix("image_")?.parse().ok()
}

async fn read_file(field: Field<'_>, index: usize) -> Result<Option<UploadedFile>, ApiError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadedFile {
        index,
        filename,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

pub async fn read_property_form(multipart: &mut Multipart) -> Result<PropertySubmission, ApiError> {
    let mut submission = PropertySubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match image_index(&name) {
            Some(index) if field.file_name().is_some() => {
                if let Some(file) = read_file(field, index).await? {
                    submission.images.push(file);
                }
            }
            _ => {
                let value = field.text().await?;
                submission.form.set(&name, value);
            }
        }
    }

    submission.images.sort_by_key(|f| f.index);
    Ok(submission)
}

pub async fn read_profile_form(multipart: &mut Multipart) -> Result<ProfileSubmission, ApiError> {
    let mut submission = ProfileSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "avatar" {
            submission.avatar = read_file(field, 0).await?;
        } else {
            let value = field.text().await?;
            submission.form.set(&name, value);
        }
    }

    Ok(submission)
}

/// First non-empty file in the `image` field.
pub async fn read_single_image(multipart: &mut Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("image") {
            if let Some(file) = read_file(field, 0).await? {
                return Ok(file);
            }
        }
    }
    Err(ApiError::bad_request("No image provided"))
}
