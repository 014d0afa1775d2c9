//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheManager, CacheOptions, ClearOptions};
use crate::cluster::NodeSpec;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearRequest, ClearResponse, DeleteResponse, EntriesResponse, GetResponse, HealthResponse,
    NodeActionResponse, NodesResponse, SetRequest, SetResponse, StatsResponse, SyncResponse,
};

/// Application state shared across all handlers.
///
/// The cache manager is wrapped in Arc<RwLock<>> for thread-safe access;
/// note that `get` mutates counters, so reads of entries still take the
/// write lock.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache manager; stored values are opaque JSON
    pub cache: Arc<RwLock<CacheManager<Value>>>,
    /// TTL in seconds applied when a SET request omits one
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState with the given cache manager.
    pub fn new(cache: CacheManager<Value>, default_ttl: u64) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheManager::new(), config.default_ttl)
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL, region and tags.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let options = CacheOptions {
        ttl: req.ttl.unwrap_or(state.default_ttl),
        region: req.region,
        tags: req.tags,
    };

    let mut cache = state.cache.write().await;
    cache.set(&req.key, req.value, options)?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. A miss (absent or expired)
/// maps to 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: get updates last_accessed and hit/miss counters
    let mut cache = state.cache.write().await;

    match cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;

    if cache.delete(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /clear
///
/// Clears the whole cache, or a subset selected by region and/or tags.
pub async fn clear_handler(
    State(state): State<AppState>,
    Json(req): Json<ClearRequest>,
) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;

    let message = if req.is_full_clear() {
        cache.clear(None);
        "Cache cleared".to_string()
    } else {
        cache.clear(Some(ClearOptions {
            region: req.region.clone(),
            tags: req.tags.clone(),
        }));
        "Selected entries cleared".to_string()
    };

    let size = cache.get_stats().size;
    Json(ClearResponse::new(message, size))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Write lock: the stats snapshot is refreshed before returning
    let mut cache = state.cache.write().await;
    let stats = cache.get_stats();

    Json(StatsResponse::from(stats))
}

/// Handler for GET /tag/:tag
///
/// Returns all live entries carrying the given tag.
pub async fn tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<EntriesResponse> {
    let cache = state.cache.read().await;
    Json(EntriesResponse::new(cache.get_by_tag(&tag)))
}

/// Handler for GET /region/:region
///
/// Returns all live entries in the given region.
pub async fn region_handler(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Json<EntriesResponse> {
    let cache = state.cache.read().await;
    Json(EntriesResponse::new(cache.get_by_region(&region)))
}

/// Handler for GET /nodes
///
/// Lists the cluster members.
pub async fn list_nodes_handler(State(state): State<AppState>) -> Json<NodesResponse> {
    let cache = state.cache.read().await;
    Json(NodesResponse::new(cache.nodes().get_nodes()))
}

/// Handler for POST /nodes
///
/// Adds a node to the cluster. A duplicate id maps to 409.
pub async fn add_node_handler(
    State(state): State<AppState>,
    Json(spec): Json<NodeSpec>,
) -> Result<Json<NodeActionResponse>> {
    let id = spec.id.clone();

    let mut cache = state.cache.write().await;
    cache.nodes_mut().add_node(spec)?;

    Ok(Json(NodeActionResponse::new(
        format!("Node '{}' added to cluster", id),
        id,
    )))
}

/// Handler for DELETE /nodes/:id
///
/// Removes a node from the cluster.
pub async fn remove_node_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeActionResponse>> {
    let mut cache = state.cache.write().await;

    if cache.nodes_mut().remove_node(&id) {
        Ok(Json(NodeActionResponse::new(
            format!("Node '{}' removed from cluster", id),
            id,
        )))
    } else {
        Err(CacheError::NodeNotFound(id))
    }
}

/// Handler for POST /nodes/:id/fail
///
/// Simulates a failure on the given node.
pub async fn fail_node_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeActionResponse>> {
    let mut cache = state.cache.write().await;

    if cache.nodes_mut().simulate_node_failure(&id) {
        Ok(Json(NodeActionResponse::new(
            format!("Node '{}' marked inactive", id),
            id,
        )))
    } else {
        Err(CacheError::NodeNotFound(id))
    }
}

/// Handler for POST /nodes/:id/recover
///
/// Recovers an inactive node back to active. A missing id maps to 404,
/// matching the other lifecycle endpoints; recovering an already-active
/// node maps to 400.
pub async fn recover_node_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeActionResponse>> {
    let mut cache = state.cache.write().await;

    if cache.nodes().get_node(&id).is_none() {
        return Err(CacheError::NodeNotFound(id));
    }

    if cache.nodes_mut().recover_node(&id) {
        Ok(Json(NodeActionResponse::new(
            format!("Node '{}' recovered to active", id),
            id,
        )))
    } else {
        Err(CacheError::InvalidRequest(format!(
            "Node '{}' is not inactive",
            id
        )))
    }
}

/// Handler for POST /sync
///
/// Runs a logical cluster sync and returns the per-node report.
pub async fn sync_handler(State(state): State<AppState>) -> Json<SyncResponse> {
    let mut cache = state.cache.write().await;
    Json(SyncResponse::new(cache.sync_nodes()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(CacheManager::new(), 300)
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = SetRequest {
            key: "test_key".to_string(),
            value: Value::String("test_value".to_string()),
            ttl: None,
            region: None,
            tags: vec![],
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let result = get_handler(State(state.clone()), Path("test_key".to_string())).await;
        assert!(result.is_ok());
        let response = result.unwrap();
        assert_eq!(response.value, Value::String("test_value".to_string()));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_invalid_ttl() {
        let state = test_state();

        let req = SetRequest {
            key: "k".to_string(),
            value: Value::Null,
            ttl: Some(0),
            region: None,
            tags: vec![],
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();

        let req = SetRequest {
            key: "to_delete".to_string(),
            value: Value::from(1),
            ttl: None,
            region: None,
            tags: vec![],
        };
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clear_handler_full() {
        let state = test_state();

        let req = SetRequest {
            key: "x".to_string(),
            value: Value::from(1),
            ttl: None,
            region: None,
            tags: vec![],
        };
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = clear_handler(State(state.clone()), Json(ClearRequest::default())).await;
        assert_eq!(response.size, 0);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.size, 0);
    }

    #[tokio::test]
    async fn test_node_lifecycle_handlers() {
        let state = test_state();

        let spec = NodeSpec {
            id: "n1".to_string(),
            name: "Node 1".to_string(),
            url: "http://cache-n1:6379".to_string(),
            status: crate::cluster::NodeStatus::Active,
            priority: 50,
        };
        add_node_handler(State(state.clone()), Json(spec.clone()))
            .await
            .unwrap();

        // Duplicate id is rejected
        let result = add_node_handler(State(state.clone()), Json(spec)).await;
        assert!(matches!(result, Err(CacheError::DuplicateNode(_))));

        fail_node_handler(State(state.clone()), Path("n1".to_string()))
            .await
            .unwrap();
        recover_node_handler(State(state.clone()), Path("n1".to_string()))
            .await
            .unwrap();

        // Recovering an active node is an invalid request
        let result = recover_node_handler(State(state.clone()), Path("n1".to_string())).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));

        remove_node_handler(State(state.clone()), Path("n1".to_string()))
            .await
            .unwrap();
        let result = remove_node_handler(State(state), Path("n1".to_string())).await;
        assert!(matches!(result, Err(CacheError::NodeNotFound(_))));
    }

    #[tokio::test]
    async fn test_recover_unknown_node_is_not_found() {
        let state = test_state();

        let result = recover_node_handler(State(state), Path("ghost".to_string())).await;
        assert!(matches!(result, Err(CacheError::NodeNotFound(_))));
    }

    #[tokio::test]
    async fn test_sync_handler() {
        let state = test_state();

        let response = sync_handler(State(state)).await;
        assert_eq!(response.results.len(), 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
