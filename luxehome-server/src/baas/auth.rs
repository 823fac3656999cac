//! Session verification against the hosted auth service

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use super::{truncate, BaasError, BaasSettings};

/// Signed-in agent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves a bearer token to the user it belongs to.
#[async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    async fn verify(&self, token: &str) -> Result<AuthUser, BaasError>;
}

/// `GET {url}/auth/v1/user`
pub struct SupabaseAuth {
    client: Client,
    settings: BaasSettings,
}

impl SupabaseAuth {
    pub fn new(client: Client, settings: BaasSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn verify(&self, token: &str) -> Result<AuthUser, BaasError> {
        let url = format!("{}/auth/v1/user", self.settings.url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.settings.anon_key)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BaasError::Unauthorized),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(BaasError::Status {
                    service: "auth",
                    status: status.as_u16(),
                    body: truncate(body),
                })
            }
            _ => Ok(response.json::<AuthUser>().await?),
        }
    }
}
