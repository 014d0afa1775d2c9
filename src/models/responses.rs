//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::cluster::{CacheNode, NodeStatus, NodeSyncReport};

/// Formats a Unix millisecond timestamp as RFC 3339 for API responses.
fn format_timestamp_ms(ms: u64) -> Option<String> {
    DateTime::from_timestamp_millis(ms as i64).map(|dt| dt.to_rfc3339())
}

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the clear operation (POST /clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Live entry count after the clear
    pub size: usize,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(message: impl Into<String>, size: usize) -> Self {
        Self {
            message: message.into(),
            size,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Hit ratio (hits / (hits + misses))
    pub hit_ratio: f64,
    /// Current number of live entries
    pub size: usize,
    /// Creation time of the longest-lived entry, RFC 3339
    pub oldest: Option<String>,
    /// Creation time of the shortest-lived entry, RFC 3339
    pub newest: Option<String>,
    /// Mean live entry age in seconds
    pub avg_age_secs: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            hit_ratio: stats.hit_ratio,
            size: stats.size,
            oldest: stats.oldest.and_then(format_timestamp_ms),
            newest: stats.newest.and_then(format_timestamp_ms),
            avg_age_secs: stats.avg_age_secs,
        }
    }
}

/// Response body for the tag/region lookup endpoints
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    /// Number of matching entries
    pub count: usize,
    /// Matching keys mapped to their stored values
    pub entries: HashMap<String, Value>,
}

impl EntriesResponse {
    /// Creates a new EntriesResponse
    pub fn new(entries: HashMap<String, Value>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// A single cluster node as rendered in API responses
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: NodeStatus,
    pub priority: i32,
    /// Last logical sync time, RFC 3339
    pub last_sync: Option<String>,
}

impl From<CacheNode> for NodeView {
    fn from(node: CacheNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            url: node.url,
            status: node.status,
            priority: node.priority,
            last_sync: format_timestamp_ms(node.last_sync),
        }
    }
}

/// Response body for the node listing endpoint (GET /nodes)
#[derive(Debug, Clone, Serialize)]
pub struct NodesResponse {
    /// Number of cluster members
    pub count: usize,
    /// Cluster members, ordered by descending priority
    pub nodes: Vec<NodeView>,
}

impl NodesResponse {
    /// Creates a new NodesResponse
    pub fn new(nodes: Vec<CacheNode>) -> Self {
        let nodes: Vec<NodeView> = nodes.into_iter().map(NodeView::from).collect();
        Self {
            count: nodes.len(),
            nodes,
        }
    }
}

/// Response body for node lifecycle operations
#[derive(Debug, Clone, Serialize)]
pub struct NodeActionResponse {
    /// Success message
    pub message: String,
    /// The affected node id
    pub id: String,
}

impl NodeActionResponse {
    /// Creates a new NodeActionResponse
    pub fn new(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: id.into(),
        }
    }
}

/// Response body for the cluster sync endpoint (POST /sync)
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    /// Success message
    pub message: String,
    /// Per-node sync outcomes
    pub results: Vec<NodeSyncReport>,
}

impl SyncResponse {
    /// Creates a new SyncResponse
    pub fn new(results: Vec<NodeSyncReport>) -> Self {
        Self {
            message: format!("Synchronized {} nodes", results.len()),
            results,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", Value::String("test_value".to_string()));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("test_key"));
        assert!(json.contains("test_value"));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_stats_response_from_cache_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            hit_ratio: 0.8,
            size: 3,
            oldest: Some(1_700_000_000_000),
            newest: Some(1_700_000_100_000),
            avg_age_secs: 1.5,
        };

        let resp = StatsResponse::from(stats);
        assert_eq!(resp.hits, 80);
        assert!((resp.hit_ratio - 0.8).abs() < 0.001);
        assert!(resp.oldest.unwrap().starts_with("2023-"));
    }

    #[test]
    fn test_stats_response_empty_cache() {
        let resp = StatsResponse::from(CacheStats::new());
        assert!(resp.oldest.is_none());
        assert!(resp.newest.is_none());
        assert_eq!(resp.avg_age_secs, 0.0);
    }

    #[test]
    fn test_entries_response_count() {
        let mut entries = HashMap::new();
        entries.insert("a".to_string(), Value::from(1));
        entries.insert("b".to_string(), Value::from(2));

        let resp = EntriesResponse::new(entries);
        assert_eq!(resp.count, 2);
    }

    #[test]
    fn test_node_view_from_node() {
        let view = NodeView::from(CacheNode::primary());
        assert_eq!(view.id, "primary");
        assert!(view.last_sync.is_some());

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"status\":\"active\""));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
