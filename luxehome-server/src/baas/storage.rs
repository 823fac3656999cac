//! Object storage uploads and public URLs

use async_trait::async_trait;
use reqwest::Client;

use super::{truncate, BaasError, BaasSettings};

/// Listing photos
pub const PROPERTY_BUCKET: &str = "properties";
/// Agent avatars, one folder per user
pub const AVATAR_BUCKET: &str = "avatars";

/// Stores bytes and hands back a URL anyone can load.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, BaasError>;
}

/// `POST {url}/storage/v1/object/{bucket}/{path}`
pub struct SupabaseStorage {
    client: Client,
    settings: BaasSettings,
}

impl SupabaseStorage {
    pub fn new(client: Client, settings: BaasSettings) -> Self {
        Self { client, settings }
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        public_url(&self.settings.url, bucket, path)
    }
}

pub(crate) fn public_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{}/storage/v1/object/public/{}/{}", base, bucket, path)
}

/// Object key for the `index`th listing photo uploaded at `millis`.
///
/// Path separators in the client file name are flattened.
pub fn property_image_path(millis: i64, index: usize, filename: &str) -> String {
    let name: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '-' } else { c })
        .collect();
    let name = if name.is_empty() { "image".to_string() } else { name };
    format!("{}-{}-{}", millis, index, name)
}

/// Object key for an avatar uploaded at `millis`.
pub fn avatar_path(user_id: uuid::Uuid, millis: i64) -> String {
    format!("{}/avatar-{}", user_id, millis)
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, BaasError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.settings.url, bucket, path);
        let key = self
            .settings
            .service_role_key
            .as_deref()
            .unwrap_or(&self.settings.anon_key);

        let response = self
            .client
            .post(&url)
            .header("apikey", key)
            .header("Authorization", format!("Bearer {}", key))
            .header("Content-Type", content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BaasError::Status {
                service: "storage",
                status,
                body: truncate(body),
            });
        }

        tracing::debug!(bucket, path, "uploaded object");
        Ok(self.public_url(bucket, path))
    }
}
