//! Hosted backend clients: auth and object storage over REST

pub mod auth;
pub mod storage;

pub use auth::{AuthProvider, AuthUser, SupabaseAuth};
pub use storage::{ObjectStore, SupabaseStorage, AVATAR_BUCKET, PROPERTY_BUCKET};

use luxehome_core::config::BaasSection;

/// Errors from the hosted backend
#[derive(Debug, thiserror::Error)]
pub enum BaasError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Token missing, expired or rejected
    #[error("invalid or expired session")]
    Unauthorized,

    #[error("backend not configured: {0}")]
    NotConfigured(&'static str),
}

/// Project URL and keys shared by the auth and storage clients
#[derive(Debug, Clone)]
pub struct BaasSettings {
    pub url: String,
    pub anon_key: String,
    /// Used for storage writes when present; falls back to the anon key
    pub service_role_key: Option<String>,
}

impl BaasSettings {
    pub fn from_config(section: &BaasSection) -> Result<Self, BaasError> {
        let url = section
            .url
            .as_deref()
            .ok_or(BaasError::NotConfigured("SUPABASE_URL"))?;
        let anon_key = section
            .anon_key
            .clone()
            .ok_or(BaasError::NotConfigured("SUPABASE_ANON_KEY"))?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            service_role_key: section.service_role_key.clone(),
        })
    }
}

/// Keep error bodies short in logs
pub(crate) fn truncate(body: String) -> String {
    if body.len() > 500 {
        let mut end = 500;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_require_url_and_key() {
        let mut section = BaasSection::default();
        assert!(matches!(
            BaasSettings::from_config(&section),
            Err(BaasError::NotConfigured("SUPABASE_URL"))
        ));

        section.url = Some("https://proj.supabase.co/".into());
        section.anon_key = Some("anon".into());
        let settings = BaasSettings::from_config(&section).unwrap();
        assert_eq!(settings.url, "https://proj.supabase.co");
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "é".repeat(400);
        let out = truncate(body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 503);
    }
}
