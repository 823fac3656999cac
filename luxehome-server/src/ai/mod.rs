//! AI assist: listing copy, photo amenity tagging and lead scoring
//!
//! Every entry point here degrades instead of failing: the caller always
//! gets a usable value, and the underlying error is logged.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use luxehome_core::amenities::{self, Amenities};
use luxehome_core::scoring::{self, DescriptionParams, DEFAULT_LEAD_SCORE, FALLBACK_DESCRIPTION};

/// Errors from the model provider
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model returned no text")]
    Empty,

    #[error("no API key configured")]
    NotConfigured,
}

/// Text and vision generation.
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError>;

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, AiError>;
}

/// Stand-in used when no API key is configured.
pub struct DisabledModel;

#[async_trait]
impl LanguageModel for DisabledModel {
    async fn generate_text(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::NotConfigured)
    }

    async fn generate_with_image(
        &self,
        _prompt: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, AiError> {
        Err(AiError::NotConfigured)
    }
}

/// Listing description, or the fallback text when generation fails.
pub async fn generate_description(model: &dyn LanguageModel, params: &DescriptionParams) -> String {
    match model.generate_text(&scoring::description_prompt(params)).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            tracing::warn!(title = %params.title, "model returned an empty description");
            FALLBACK_DESCRIPTION.to_string()
        }
        Err(e) => {
            tracing::error!(error = %e, title = %params.title, "description generation failed");
            FALLBACK_DESCRIPTION.to_string()
        }
    }
}

/// Catalogue amenities visible in the photo; empty on any failure.
pub async fn analyze_image(model: &dyn LanguageModel, image: &[u8], mime_type: &str) -> Amenities {
    match model
        .generate_with_image(&scoring::vision_prompt(), image, mime_type)
        .await
    {
        Ok(reply) => amenities::retain_known(scoring::parse_amenity_json(&reply)),
        Err(e) => {
            tracing::error!(error = %e, bytes = image.len(), "image analysis failed");
            Amenities::new()
        }
    }
}

/// Lead score in 0..=100; 50 when the model is unavailable.
pub async fn score_lead(model: &dyn LanguageModel, message: &str) -> i32 {
    match model.generate_text(&scoring::lead_score_prompt(message)).await {
        Ok(reply) => scoring::parse_score(&reply),
        Err(e) => {
            tracing::warn!(error = %e, "lead scoring failed, using default");
            DEFAULT_LEAD_SCORE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubModel;

    #[tokio::test]
    async fn description_trims_reply() {
        let model = StubModel::replying("  Sunlit rooms open onto the bay.\n");
        let text = generate_description(&model, &DescriptionParams::default()).await;
        assert_eq!(text, "Sunlit rooms open onto the bay.");
    }

    #[tokio::test]
    async fn description_falls_back() {
        let text = generate_description(&DisabledModel, &DescriptionParams::default()).await;
        assert_eq!(text, FALLBACK_DESCRIPTION);

        let text = generate_description(&StubModel::replying("   "), &DescriptionParams::default()).await;
        assert_eq!(text, FALLBACK_DESCRIPTION);
    }

    #[tokio::test]
    async fn vision_keeps_catalogue_keys_only() {
        let model = StubModel::replying(r#"Sure! {"pool": true, "Ocean View": true, "moat": true}"#);
        let found = analyze_image(&model, b"jpeg", "image/jpeg").await;
        assert_eq!(found.get("pool"), Some(&true));
        assert_eq!(found.get("oceanView"), Some(&true));
        assert!(!found.contains_key("moat"));

        assert!(analyze_image(&DisabledModel, b"jpeg", "image/jpeg").await.is_empty());
    }

    #[tokio::test]
    async fn score_uses_reply_or_default() {
        assert_eq!(score_lead(&StubModel::replying("92"), "cash buyer").await, 92);
        assert_eq!(score_lead(&StubModel::replying("unsure"), "hi").await, DEFAULT_LEAD_SCORE);
        assert_eq!(score_lead(&DisabledModel, "hi").await, DEFAULT_LEAD_SCORE);
    }
}
