//! Cache Statistics Module
//!
//! Tracks hit/miss counters and computes aggregate age statistics over the
//! entry map. The aggregate computations are pure functions over the entries
//! passed in; only live entries are counted and the store is never mutated
//! here, so lazy deletion in `get` stays the single removal path.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::entry::{current_timestamp_ms, CacheEntry};

// == Cache Stats ==
/// Aggregate cache metrics, recomputed on demand.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals (monotonic)
    pub hits: u64,
    /// Number of failed cache retrievals, absent or expired (monotonic)
    pub misses: u64,
    /// hits / (hits + misses), 0.0 before any access
    pub hit_ratio: f64,
    /// Current number of live entries
    pub size: usize,
    /// Creation timestamp of the longest-lived live entry (Unix ms)
    pub oldest: Option<u64>,
    /// Creation timestamp of the shortest-lived live entry (Unix ms)
    pub newest: Option<u64>,
    /// Mean age of live entries in seconds, 0.0 when empty
    pub avg_age_secs: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}

// == Update Stats ==
/// Recomputes `size`, `oldest`, `newest` and `avg_age_secs` from the entry
/// map. Hit/miss counters and the hit ratio are left untouched.
///
/// Expired entries still present in the store are ignored (not deleted).
pub fn update_stats<T>(entries: &HashMap<String, CacheEntry<T>>, stats: &mut CacheStats) {
    let now = current_timestamp_ms();

    let mut size = 0usize;
    let mut oldest: Option<u64> = None;
    let mut newest: Option<u64> = None;
    let mut total_age_ms = 0u64;

    for entry in entries.values() {
        if !entry.is_live_at(now) {
            continue;
        }

        size += 1;
        total_age_ms += entry.age_ms(now);

        oldest = Some(match oldest {
            Some(ts) => ts.min(entry.created),
            None => entry.created,
        });
        newest = Some(match newest {
            Some(ts) => ts.max(entry.created),
            None => entry.created,
        });
    }

    stats.size = size;
    stats.oldest = oldest;
    stats.newest = newest;
    stats.avg_age_secs = if size > 0 {
        total_age_ms as f64 / size as f64 / 1000.0
    } else {
        0.0
    };
}

// == Update Hit Ratio ==
/// Recomputes `hit_ratio = hits / (hits + misses)`, guarding the
/// zero-denominator case to 0.0.
pub fn update_hit_ratio(stats: &mut CacheStats) {
    let total = stats.hits + stats.misses;
    stats.hit_ratio = if total == 0 {
        0.0
    } else {
        stats.hits as f64 / total as f64
    };
}
