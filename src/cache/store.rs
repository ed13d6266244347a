//! Cache Store Module
//!
//! Main cache engine: a HashMap of TTL entries with lazy expiry and
//! substring-pattern invalidation.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == TTL Cache ==
/// In-process key/value cache whose entries expire after a TTL.
///
/// None of the operations fail. Expired entries are removed when they are
/// next read, by [`TtlCache::cleanup_expired`], or by [`TtlCache::clear`].
#[derive(Debug)]
pub struct TtlCache<V = Value> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL in milliseconds for entries set without an explicit TTL
    default_ttl_ms: u64,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache on the system clock.
    ///
    /// # Arguments
    /// * `default_ttl_ms` - TTL applied when `set` is called without one
    pub fn new(default_ttl_ms: u64) -> Self {
        Self::with_clock(default_ttl_ms, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(default_ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl_ms,
            clock,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl_ms` from now.
    ///
    /// Any existing entry for the key is replaced and its TTL restarts.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl_ms` - Optional TTL in milliseconds (uses the default if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_ms: Option<u64>) {
        let ttl_ms = ttl_ms.unwrap_or(self.default_ttl_ms);
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl_ms);
        self.entries.insert(key.into(), entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value under `key` if present and not expired.
    ///
    /// An expired entry is removed before reporting the miss, so a second
    /// read also misses.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            debug!(key, "cache miss");
            return None;
        };

        if entry.is_expired_at(now) {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            self.stats.record_miss();
            debug!(key, "cache miss (expired)");
            return None;
        }

        let value = entry.value.clone();
        self.stats.record_hit();
        debug!(key, "cache hit");
        Some(value)
    }

    // == Clear ==
    /// Removes entries and returns how many were dropped.
    ///
    /// With no pattern every entry is removed. With a pattern, every entry
    /// whose key contains it as a plain substring is removed; this can
    /// reach keys that merely share the substring.
    pub fn clear(&mut self, pattern: Option<&str>) -> usize {
        let removed = match pattern {
            None => {
                let count = self.entries.len();
                self.entries.clear();
                count
            }
            Some(pattern) => {
                let before = self.entries.len();
                self.entries.retain(|key, _| !key.contains(pattern));
                before - self.entries.len()
            }
        };

        self.stats.record_invalidations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn default_ttl_ms(&self) -> u64 {
        self.default_ttl_ms
    }

    /// Returns the number of stored entries, including expired ones not yet
    /// reclaimed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
