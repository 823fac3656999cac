//! Gemini `generateContent` over REST

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use luxehome_core::config::AiSection;

use super::{AiError, LanguageModel};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        Some(text).filter(|t| !t.is_empty())
    }
}

/// Gemini client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Client from the `[ai]` config section; `None` without an API key.
    pub fn from_config(section: &AiSection) -> Result<Option<Self>, AiError> {
        let Some(api_key) = section.api_key.clone() else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(section.timeout_secs))
            .build()?;
        Ok(Some(Self {
            client,
            api_key,
            model: section.model.clone(),
            base_url: section.base_url.trim_end_matches('/').to_string(),
        }))
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, parts: Vec<Part<'_>>) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status {
                status,
                body: crate::baas::truncate(body),
            });
        }

        let reply: GenerateResponse = response.json().await?;
        reply.text().ok_or(AiError::Empty)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        self.generate(vec![Part::Text { text: prompt }]).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, AiError> {
        self.generate(vec![
            Part::Text { text: prompt },
            Part::Inline {
                inline_data: InlineData {
                    mime_type,
                    data: STANDARD.encode(image),
                },
            },
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: "tag this" },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: "image/png",
                            data: STANDARD.encode(b"png"),
                        },
                    },
                ],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"contents": [{"parts": [
                {"text": "tag this"},
                {"inline_data": {"mime_type": "image/png", "data": "cG5n"}}
            ]}]})
        );
    }

    #[test]
    fn reply_text_joins_parts() {
        let reply: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "8"}, {"text": "5"}], "role": "model"}}],
            "usageMetadata": {}
        }))
        .unwrap();
        assert_eq!(reply.text().as_deref(), Some("85"));

        let blocked: GenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(blocked.text(), None);
    }

    #[test]
    fn endpoint_uses_configured_model() {
        let section = AiSection {
            api_key: Some("k".into()),
            ..AiSection::default()
        };
        let client = GeminiClient::from_config(&section).unwrap().unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert!(GeminiClient::from_config(&AiSection::default()).unwrap().is_none());
    }
}
