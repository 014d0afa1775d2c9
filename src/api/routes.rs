//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_node_handler, clear_handler, delete_handler, fail_node_handler, get_handler,
    health_handler, list_nodes_handler, recover_node_handler, region_handler, remove_node_handler,
    set_handler, stats_handler, sync_handler, tag_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair
/// - `GET /get/:key` - Retrieve a value by key
/// - `DELETE /del/:key` - Delete a key
/// - `POST /clear` - Clear all entries, or by region/tags
/// - `GET /stats` - Get cache statistics
/// - `GET /tag/:tag` - List entries carrying a tag
/// - `GET /region/:region` - List entries in a region
/// - `GET /nodes` / `POST /nodes` - List / add cluster nodes
/// - `DELETE /nodes/:id` - Remove a cluster node
/// - `POST /nodes/:id/fail` / `POST /nodes/:id/recover` - Node lifecycle
/// - `POST /sync` - Run a logical cluster sync
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/clear", post(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/tag/:tag", get(tag_handler))
        .route("/region/:region", get(region_handler))
        .route("/nodes", get(list_nodes_handler).post(add_node_handler))
        .route("/nodes/:id", delete(remove_node_handler))
        .route("/nodes/:id/fail", post(fail_node_handler))
        .route("/nodes/:id/recover", post(recover_node_handler))
        .route("/sync", post(sync_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
