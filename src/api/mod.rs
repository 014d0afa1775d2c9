//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `POST /clear` - Clear all entries, or by region/tags
//! - `GET /stats` - Get cache statistics
//! - `GET /tag/:tag` / `GET /region/:region` - Indexed lookups
//! - `GET|POST /nodes`, `DELETE /nodes/:id`, node fail/recover, `POST /sync`
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
