//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL, region and
//! tag metadata.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Region assigned to entries that do not specify one.
pub const DEFAULT_REGION: &str = "default";

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// The stored value is opaque to the cache; callers are responsible for
/// serializing complex values before storing them.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Creation timestamp (Unix milliseconds)
    pub created: u64,
    /// Expiration timestamp (Unix milliseconds), `created + ttl * 1000`
    pub expiry: u64,
    /// Last successful read timestamp (Unix milliseconds)
    pub last_accessed: u64,
    /// Logical partition label, used for bulk eviction
    pub region: String,
    /// Free-form labels, used for bulk eviction and indexed lookup
    pub tags: HashSet<String>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// # Arguments
    /// * `data` - The value to store
    /// * `ttl_seconds` - TTL in seconds (must be validated by the caller)
    /// * `region` - Optional region label (falls back to `DEFAULT_REGION`)
    /// * `tags` - Tag labels, may be empty
    pub fn new(data: T, ttl_seconds: u64, region: Option<String>, tags: Vec<String>) -> Self {
        let now = current_timestamp_ms();

        Self {
            data,
            created: now,
            // Saturate so an enormous TTL clamps to the far future instead
            // of overflowing
            expiry: now.saturating_add(ttl_seconds.saturating_mul(1000)),
            last_accessed: now,
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            tags: tags.into_iter().collect(),
        }
    }

    // == Is Live ==
    /// Checks whether the entry is still live.
    ///
    /// Boundary condition: an entry is live iff `expiry > now`. Once the
    /// current time reaches the expiration timestamp the entry is expired
    /// and must be treated as a miss.
    pub fn is_live(&self) -> bool {
        self.is_live_at(current_timestamp_ms())
    }

    /// Checks liveness against an externally sampled timestamp, so a scan
    /// over many entries observes one consistent clock reading.
    pub fn is_live_at(&self, now: u64) -> bool {
        self.expiry > now
    }

    // == Has Tag ==
    /// Checks whether the entry carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Checks whether the entry carries any of the given tags (OR semantics).
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or 0 if expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expiry.saturating_sub(current_timestamp_ms())
    }

    /// Returns the entry age in milliseconds at the given timestamp.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.created)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
