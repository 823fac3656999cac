//! Master amenity catalogue
//!
//! Properties store amenities as a JSON object of `{ "<key>": bool }`.
//! Forms, filters, AI vision tagging and the detail view all resolve
//! against this one list.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Amenity flags as stored in the `amenities` jsonb column
pub type Amenities = BTreeMap<String, bool>;

/// Grouping used by forms and the filter sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityCategory {
    Wellness,
    Views,
    Premium,
    Basics,
}

/// One catalogue entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Amenity {
    pub key: &'static str,
    pub label: &'static str,
    pub category: AmenityCategory,
}

const fn amenity(key: &'static str, label: &'static str, category: AmenityCategory) -> Amenity {
    Amenity { key, label, category }
}

pub const MASTER_AMENITIES: [Amenity; 19] = [
    amenity("pool", "Pool", AmenityCategory::Wellness),
    amenity("infinityPool", "Infinity Pool", AmenityCategory::Wellness),
    amenity("spa", "Spa/Hot Tub", AmenityCategory::Wellness),
    amenity("sauna", "Sauna", AmenityCategory::Wellness),
    amenity("gym", "Gym", AmenityCategory::Wellness),
    amenity("oceanView", "Ocean View", AmenityCategory::Views),
    amenity("cityView", "City View", AmenityCategory::Views),
    amenity("mountainView", "Mountain View", AmenityCategory::Views),
    amenity("waterfront", "Waterfront", AmenityCategory::Views),
    amenity("homeTheater", "Home Theater", AmenityCategory::Premium),
    amenity("wineCellar", "Wine Cellar", AmenityCategory::Premium),
    amenity("smartHome", "Smart Home", AmenityCategory::Premium),
    amenity("fireplace", "Fireplace", AmenityCategory::Premium),
    amenity("elevator", "Elevator", AmenityCategory::Premium),
    amenity("guestHouse", "Guest House", AmenityCategory::Premium),
    amenity("wifi", "Wifi", AmenityCategory::Basics),
    amenity("parking", "Parking", AmenityCategory::Basics),
    amenity("security", "Security", AmenityCategory::Basics),
    amenity("gatedCommunity", "Gated Community", AmenityCategory::Basics),
];

/// Free-text fragments seen in legacy tag data, checked in order.
/// First hit wins, so "infinity" must precede "pool".
const LEGACY_SYNONYMS: &[(&str, &str)] = &[
    ("infinity", "infinityPool"),
    ("pool", "pool"),
    ("hot tub", "spa"),
    ("spa", "spa"),
    ("sauna", "sauna"),
    ("fitness", "gym"),
    ("gym", "gym"),
    ("ocean", "oceanView"),
    ("beach", "oceanView"),
    ("mountain", "mountainView"),
    ("lake", "waterfront"),
    ("waterfront", "waterfront"),
    ("city", "cityView"),
    ("view", "cityView"),
    ("theater", "homeTheater"),
    ("cinema", "homeTheater"),
    ("wine", "wineCellar"),
    ("smart", "smartHome"),
    ("fireplace", "fireplace"),
    ("elevator", "elevator"),
    ("guest", "guestHouse"),
    ("gated", "gatedCommunity"),
    ("wifi", "wifi"),
    ("internet", "wifi"),
    ("garage", "parking"),
    ("parking", "parking"),
    ("doorman", "security"),
    ("security", "security"),
];

/// All catalogue keys set to false.
pub fn empty() -> Amenities {
    MASTER_AMENITIES
        .iter()
        .map(|a| (a.key.to_string(), false))
        .collect()
}

/// Display label for a key, or the key itself when unknown.
pub fn label_for(key: &str) -> &str {
    MASTER_AMENITIES
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.label)
        .unwrap_or(key)
}

/// Canonical key for a key or label, case-insensitive.
///
/// The filter sidebar submits labels ("Ocean View") while forms submit
/// keys ("oceanView"); both land on the same key.
pub fn resolve(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    MASTER_AMENITIES
        .iter()
        .find(|a| a.key.eq_ignore_ascii_case(needle) || a.label.eq_ignore_ascii_case(needle))
        .map(|a| a.key)
}

/// Keys flagged true, in catalogue order.
pub fn active(amenities: &Amenities) -> Vec<&'static str> {
    MASTER_AMENITIES
        .iter()
        .filter(|a| amenities.get(a.key).copied().unwrap_or(false))
        .map(|a| a.key)
        .collect()
}

/// Drop keys that aren't in the catalogue, canonicalizing the rest.
pub fn retain_known(amenities: Amenities) -> Amenities {
    amenities
        .into_iter()
        .filter_map(|(k, v)| resolve(&k).map(|key| (key.to_string(), v)))
        .collect()
}

/// Parse a submitted JSON object into known amenity flags.
///
/// Non-boolean values and unknown keys are ignored.
pub fn from_json_object(value: &Value) -> Amenities {
    let mut out = Amenities::new();
    if let Value::Object(map) = value {
        for (k, v) in map {
            if let (Some(key), Some(flag)) = (resolve(k), v.as_bool()) {
                out.insert(key.to_string(), flag);
            }
        }
    }
    out
}

fn legacy_tag_key(tag: &str) -> Option<&'static str> {
    if let Some(key) = resolve(tag) {
        return Some(key);
    }
    let lower = tag.to_lowercase();
    LEGACY_SYNONYMS
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, key)| *key)
}

/// Convert legacy amenity data into a full catalogue map.
///
/// Accepts the old tag-array form (`["Pool", "Ocean views"]`), partial
/// objects (`{"pool": true, "view": true}`) and either of those encoded
/// as a JSON string. Anything else yields `empty()`.
pub fn from_legacy(value: &Value) -> Amenities {
    let mut out = empty();
    match value {
        Value::Array(tags) => {
            for key in tags.iter().filter_map(Value::as_str).filter_map(legacy_tag_key) {
                out.insert(key.to_string(), true);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                if v.as_bool() == Some(true) {
                    if let Some(key) = legacy_tag_key(k) {
                        out.insert(key.to_string(), true);
                    }
                }
            }
        }
        Value::String(raw) => {
            if let Ok(inner) = serde_json::from_str::<Value>(raw) {
                if !inner.is_string() {
                    return from_legacy(&inner);
                }
            }
        }
        _ => {}
    }
    out
}
