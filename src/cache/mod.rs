//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration, region/tag indexing
//! and hit/miss statistics.

mod entry;
mod manager;
mod stats;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, DEFAULT_REGION};
pub use manager::{CacheManager, CacheOptions, ClearOptions};
pub use stats::{update_hit_ratio, update_stats, CacheStats};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
