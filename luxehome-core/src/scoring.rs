//! Prompts and response parsing for the AI assistant
//!
//! The model is only ever asked three things: write a listing
//! description, tag amenities in a photo, and score a lead 0-100.
//! Model output is untrusted text, so every parser here has a fallback.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::amenities::{self, Amenities, MASTER_AMENITIES};

/// Score stored when the model is unavailable or answers with no number
pub const DEFAULT_LEAD_SCORE: i32 = 50;

/// Description returned when generation fails
pub const FALLBACK_DESCRIPTION: &str = "Experience the epitome of luxury living in this stunning residence. (AI Generation Failed - Check API Key)";

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?\d+").expect("invalid score regex"));

/// First flat `{...}` object in the text
static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]+\}").expect("invalid object regex"));

/// Inputs for a listing description
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptionParams {
    pub title: String,
    pub location: String,
    /// e.g. "5 beds, 6 baths, 4500 sqft"
    pub stats: String,
    /// Tags detected in photos
    #[serde(default)]
    pub features: Vec<String>,
    /// Amenity keys switched on in the form
    #[serde(default)]
    pub amenities: Vec<String>,
}

pub fn description_prompt(params: &DescriptionParams) -> String {
    format!(
        "Write a compelling luxury real estate listing description.\n\n\
         CRITICAL CONSTRAINTS:\n\
         1. Do NOT include a title or header. Start directly with the body text.\n\
         2. Incorporate these specific features: {features}\n\
         3. Incorporate these amenities: {amenities}\n\
         4. Property stats: {stats}\n\
         5. Location: {location}\n\n\
         TONE: Sophisticated, inviting, and professional.\n\
         LENGTH: Maximum 2 paragraphs.\n\
         STYLE: Focus on lifestyle and experience, not just features.",
        features = params.features.join(", "),
        amenities = params.amenities.join(", "),
        stats = params.stats,
        location = params.location,
    )
}

pub fn vision_prompt() -> String {
    let keys: Vec<&str> = MASTER_AMENITIES.iter().map(|a| a.key).collect();
    format!(
        "Analyze this real estate image and detect ONLY amenities from this specific list: {}.\n\n\
         CRITICAL RULES:\n\
         1. Return ONLY a JSON object with detected amenity keys\n\
         2. Use camelCase format exactly as provided\n\
         3. If you see something NOT on the list, IGNORE it\n\
         4. Be conservative - only return amenities you are CONFIDENT are visible\n\n\
         Example response: {{\"pool\": true, \"oceanView\": true}}\n\n\
         RESPOND WITH ONLY THE JSON OBJECT, NO OTHER TEXT.",
        keys.join(", ")
    )
}

pub fn lead_score_prompt(message: &str) -> String {
    format!(
        "Analyze the following real estate lead message and assign a \"Lead Score\" from 0 to 100 \
         based on intent, urgency, and budget implication. Return ONLY the number. Message: \"{}\"",
        message
    )
}

/// Leading integer of the reply, clamped to 0..=100; 50 otherwise.
pub fn parse_score(text: &str) -> i32 {
    LEADING_INT
        .find(text.trim())
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(|n| n.clamp(0, 100) as i32)
        .unwrap_or(DEFAULT_LEAD_SCORE)
}

/// Amenity flags from a vision reply; anything unparsable yields `{}`.
pub fn parse_amenity_json(text: &str) -> Amenities {
    let Some(found) = JSON_OBJECT.find(text) else {
        return Amenities::new();
    };
    match serde_json::from_str::<serde_json::Value>(found.as_str()) {
        Ok(value) => amenities::from_json_object(&value),
        Err(e) => {
            tracing::warn!(error = %e, reply = %text, "vision reply was not JSON");
            Amenities::new()
        }
    }
}
