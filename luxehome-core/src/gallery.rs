//! Property gallery: the image-array JSON field
//!
//! `properties.image` is a text column holding a JSON array of URLs.
//! Stored galleries always have exactly five entries.

use serde_json::Value;

/// Placeholder shown when a property has no images
pub const FALLBACK_IMAGE: &str = "/fallback-property.jpg";

/// Number of URLs kept in a stored gallery
pub const GALLERY_SIZE: usize = 5;

/// Pad or trim a list of URLs to exactly five.
///
/// - no URLs: five fallbacks
/// - fewer than five: repeat the first URL
/// - more than five: keep the first five
pub fn pad<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    let mut out: Vec<String> = urls
        .iter()
        .map(|u| u.as_ref().trim())
        .filter(|u| !u.is_empty())
        .take(GALLERY_SIZE)
        .map(str::to_owned)
        .collect();

    let filler = out
        .first()
        .cloned()
        .unwrap_or_else(|| FALLBACK_IMAGE.to_string());
    out.resize(GALLERY_SIZE, filler);
    out
}

/// Encode URLs into the stored column form.
pub fn encode<S: AsRef<str>>(urls: &[S]) -> String {
    // Vec<String> always serializes
    serde_json::to_string(&pad(urls)).unwrap_or_else(|_| "[]".to_string())
}

/// Every URL the raw column value refers to, before padding.
fn parse_raw(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        Ok(Value::String(single)) => vec![single],
        // Bare URL, or some other JSON scalar we treat as text
        _ => vec![raw.to_string()],
    }
}

/// Decode a stored column value into five display URLs.
pub fn decode(raw: Option<&str>) -> Vec<String> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => pad(&parse_raw(raw)),
        None => pad::<&str>(&[]),
    }
}

/// Re-encode a stored value; `changed` is false when it was already canonical.
pub fn normalize(raw: Option<&str>) -> (String, bool) {
    let encoded = encode(&decode(raw));
    let changed = raw != Some(encoded.as_str());
    (encoded, changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_images_uses_fallback() {
        let urls = pad::<&str>(&[]);
        assert_eq!(urls, vec![FALLBACK_IMAGE; 5]);
    }

    #[test]
    fn pads_with_first_image() {
        let urls = pad(&["a.jpg", "b.jpg"]);
        assert_eq!(urls, vec!["a.jpg", "b.jpg", "a.jpg", "a.jpg", "a.jpg"]);
    }

    #[test]
    fn trims_to_five() {
        let input: Vec<String> = (0..8).map(|i| format!("{i}.jpg")).collect();
        let urls = pad(&input);
        assert_eq!(urls.len(), 5);
        assert_eq!(urls[4], "4.jpg");
    }

    #[test]
    fn skips_blank_entries() {
        let urls = pad(&["", "  ", "c.jpg"]);
        assert_eq!(urls, vec!["c.jpg"; 5]);
    }

    #[test]
    fn decode_handles_each_stored_shape() {
        assert_eq!(decode(None), vec![FALLBACK_IMAGE; 5]);
        assert_eq!(decode(Some("")), vec![FALLBACK_IMAGE; 5]);
        assert_eq!(decode(Some("https://x/y.jpg")), vec!["https://x/y.jpg"; 5]);
        assert_eq!(decode(Some("\"https://x/y.jpg\"")), vec!["https://x/y.jpg"; 5]);
        assert_eq!(
            decode(Some(r#"["a.jpg","","b.jpg"]"#)),
            vec!["a.jpg", "b.jpg", "a.jpg", "a.jpg", "a.jpg"]
        );
        assert_eq!(decode(Some("[]")), vec![FALLBACK_IMAGE; 5]);
    }

    #[test]
    fn encode_is_json_array() {
        let encoded = encode(&["a.jpg"]);
        assert_eq!(encoded, r#"["a.jpg","a.jpg","a.jpg","a.jpg","a.jpg"]"#);
    }

    #[test]
    fn normalize_reports_changes() {
        let (encoded, changed) = normalize(Some("a.jpg"));
        assert!(changed);
        let (again, changed_again) = normalize(Some(encoded.as_str()));
        assert_eq!(encoded, again);
        assert!(!changed_again);
    }
}
