//! Hashing - SHA-256 over Canonical JSON
//!
//! Identical designs hash identically regardless of key order.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::persistence::PersistedState;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// design_hash = sha256(template + ":" + format + ":" + canonical persisted snapshot)
pub fn design_hash(format: &str, design: &PersistedState) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(design)?;
    let combined = format!("{}:{}:{}", design.style.template, format, canonical);
    Ok(sha256_hex(combined.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": {"b": 1, "a": 2}});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"a":2,"m":{"a":2,"b":1},"z":1}"#);
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex(b"Hello, World!"),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_design_hash_tracks_content() {
        let design = PersistedState::default();
        let h1 = design_hash("svg", &design).unwrap();
        let h2 = design_hash("svg", &design).unwrap();
        assert_eq!(h1, h2);

        let mut edited = design.clone();
        edited.content.title = "Other".into();
        assert_ne!(h1, design_hash("svg", &edited).unwrap());
        assert_ne!(h1, design_hash("png", &design).unwrap());

        let mut switched = design.clone();
        switched.style.template = TemplateId::Bold;
        assert_ne!(h1, design_hash("svg", &switched).unwrap());
    }
}
