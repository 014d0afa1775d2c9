//! Cache Manager Module
//!
//! Main cache engine combining HashMap storage with lazy TTL expiration,
//! region/tag secondary lookup, hit/miss statistics and a logical cluster
//! membership layer.
//!
//! Expiration is lazy: there is no sweep task, so an expired entry lingers
//! in the store until a `get` touches it or a `delete`/`clear` removes it
//! explicitly. Stats refreshes and region/tag scans skip expired entries
//! but never remove them.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::cache::entry::{current_timestamp_ms, CacheEntry};
use crate::cache::stats::{update_hit_ratio, update_stats, CacheStats};
use crate::cache::MAX_KEY_LENGTH;
use crate::cluster::{NodeManager, NodeSyncReport};
use crate::error::{CacheError, Result};

// == Cache Options ==
/// Per-entry options supplied on `set`.
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    /// TTL in seconds, must be greater than zero
    pub ttl: u64,
    /// Logical partition label, defaults to `"default"`
    pub region: Option<String>,
    /// Free-form labels, may be empty
    pub tags: Vec<String>,
}

// == Clear Options ==
/// Selective clear filters. Region and tags are applied as two independent
/// passes over the store, not a combined AND predicate.
#[derive(Debug, Clone, Default)]
pub struct ClearOptions {
    /// Remove entries whose region exactly matches
    pub region: Option<String>,
    /// Remove entries whose tag set intersects this list (OR semantics)
    pub tags: Vec<String>,
}

// == Cache Manager ==
/// Sole authority over cache entries; owns the entry map, the statistics
/// struct and the cluster membership sub-component.
#[derive(Debug)]
pub struct CacheManager<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Hit/miss counters and aggregate metrics
    stats: CacheStats,
    /// Logical cluster membership
    cluster: NodeManager,
}

impl<T: Clone> CacheManager<T> {
    // == Constructor ==
    /// Creates a new CacheManager with an empty store and a cluster seeded
    /// with the primary node.
    pub fn new() -> Self {
        info!("Cache manager initialized");
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            cluster: NodeManager::new(),
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit updates `last_accessed` and the hit counter and returns a clone
    /// of the stored value. An absent key counts as a miss. An expired entry
    /// counts as a miss and is removed as a side effect (lazy expiration).
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = current_timestamp_ms();

        if let Some(entry) = self.entries.get_mut(key) {
            if entry.is_live_at(now) {
                entry.last_accessed = now;
                let value = entry.data.clone();

                self.stats.record_hit();
                update_hit_ratio(&mut self.stats);
                debug!(key, "cache hit");
                return Some(value);
            }
        } else {
            self.stats.record_miss();
            update_hit_ratio(&mut self.stats);
            debug!(key, "cache miss");
            return None;
        }

        // Lazy expiration: the read removes the dead entry
        self.entries.remove(key);
        update_stats(&self.entries, &mut self.stats);
        self.stats.record_miss();
        update_hit_ratio(&mut self.stats);
        debug!(key, "cache miss (expired)");
        None
    }

    // == Set ==
    /// Stores a value under a key, unconditionally overwriting any existing
    /// entry. `expiry` is computed as `now + ttl * 1000`.
    ///
    /// Rejects empty keys, keys longer than `MAX_KEY_LENGTH` bytes and a
    /// zero TTL with `CacheError::InvalidRequest`.
    pub fn set(&mut self, key: &str, data: T, options: CacheOptions) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest(
                "Key cannot be empty".to_string(),
            ));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if options.ttl == 0 {
            return Err(CacheError::InvalidRequest(
                "TTL must be greater than zero".to_string(),
            ));
        }

        let entry = CacheEntry::new(data, options.ttl, options.region, options.tags);
        debug!(key, ttl = options.ttl, region = %entry.region, "cache set");
        self.entries.insert(key.to_string(), entry);

        update_stats(&self.entries, &mut self.stats);
        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. Returns true iff an entry existed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        update_stats(&self.entries, &mut self.stats);

        if removed {
            debug!(key, "cache delete");
        }
        removed
    }

    // == Clear ==
    /// Clears the whole store, or a subset selected by region and/or tags.
    ///
    /// With no options every entry is removed. Otherwise the region filter
    /// and the tag filter run as two independent passes: first every entry
    /// whose region exactly matches is removed, then every remaining entry
    /// whose tag set intersects the given tags (OR, not AND).
    pub fn clear(&mut self, options: Option<ClearOptions>) {
        let before = self.entries.len();

        match options {
            None => {
                self.entries.clear();
                info!(removed = before, "cache cleared completely");
            }
            Some(opts) => {
                if let Some(region) = &opts.region {
                    self.entries.retain(|_, entry| entry.region != *region);
                    info!(region = %region, "cache region cleared");
                }

                if !opts.tags.is_empty() {
                    self.entries
                        .retain(|_, entry| !entry.has_any_tag(&opts.tags));
                    info!(tags = ?opts.tags, "cache tags cleared");
                }

                debug!(removed = before - self.entries.len(), "selective clear done");
            }
        }

        update_stats(&self.entries, &mut self.stats);
    }

    // == Stats ==
    /// Refreshes and returns a snapshot of the cache statistics.
    pub fn get_stats(&mut self) -> CacheStats {
        update_stats(&self.entries, &mut self.stats);
        self.stats.clone()
    }

    // == Get By Tag ==
    /// Returns the keys and values of all live entries carrying the tag.
    pub fn get_by_tag(&self, tag: &str) -> HashMap<String, T> {
        let now = current_timestamp_ms();

        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_live_at(now) && entry.has_tag(tag))
            .map(|(key, entry)| (key.clone(), entry.data.clone()))
            .collect()
    }

    // == Get By Region ==
    /// Returns the keys and values of all live entries in the region.
    pub fn get_by_region(&self, region: &str) -> HashMap<String, T> {
        let now = current_timestamp_ms();

        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_live_at(now) && entry.region == region)
            .map(|(key, entry)| (key.clone(), entry.data.clone()))
            .collect()
    }

    // == Cluster Access ==
    /// Exposes the cluster membership sub-component.
    pub fn nodes(&self) -> &NodeManager {
        &self.cluster
    }

    /// Mutable access to the cluster membership sub-component.
    pub fn nodes_mut(&mut self) -> &mut NodeManager {
        &mut self.cluster
    }

    // == Sync Nodes ==
    /// Runs a logical cluster sync, returning one report per node.
    pub fn sync_nodes(&mut self) -> Vec<NodeSyncReport> {
        self.cluster.sync_nodes()
    }

    // == Length ==
    /// Returns the raw entry count, including not-yet-collected expired
    /// entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for CacheManager<T> {
    fn default() -> Self {
        Self::new()
    }
}
