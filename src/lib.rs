//! Distcache - An in-memory distributed cache simulation
//!
//! Provides a cache engine with TTL-based lazy expiration, region/tag
//! indexing, hit/miss statistics, and a logical cluster membership layer.

pub mod api;
pub mod cache;
pub mod cluster;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
