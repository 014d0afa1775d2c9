//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store, opaque JSON
/// - `ttl`: Optional TTL in seconds (uses the configured default if absent)
/// - `region`: Optional region label (defaults to `"default"`)
/// - `tags`: Optional tag labels
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Optional region label
    #[serde(default)]
    pub region: Option<String>,
    /// Optional tag labels
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for the selective clear operation (POST /clear)
///
/// An empty body object clears the whole cache; `region` and `tags` select
/// subsets, applied as independent passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearRequest {
    /// Remove entries whose region exactly matches
    #[serde(default)]
    pub region: Option<String>,
    /// Remove entries carrying any of these tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ClearRequest {
    /// True when no filter was supplied, meaning a full clear.
    pub fn is_full_clear(&self) -> bool {
        self.region.is_none() && self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, Value::String("hello".to_string()));
        assert!(req.ttl.is_none());
        assert!(req.region.is_none());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_set_request_full() {
        let json = r#"{"key": "test", "value": {"n": 1}, "ttl": 60, "region": "users", "tags": ["a", "b"]}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(60));
        assert_eq!(req.region.as_deref(), Some("users"));
        assert_eq!(req.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_clear_request_empty_is_full_clear() {
        let req: ClearRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_full_clear());
    }

    #[test]
    fn test_clear_request_with_filters() {
        let json = r#"{"region": "users", "tags": ["hot"]}"#;
        let req: ClearRequest = serde_json::from_str(json).unwrap();
        assert!(!req.is_full_clear());
        assert_eq!(req.region.as_deref(), Some("users"));
    }
}
