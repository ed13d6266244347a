//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A cached value together with the instant it was stored and its TTL.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Time-to-live in milliseconds from `stored_at`
    pub ttl_ms: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stored at `stored_at` living for `ttl_ms`.
    pub fn new(value: V, stored_at: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            stored_at,
            ttl_ms,
        }
    }

    // == Expires At ==
    /// Instant (Unix milliseconds) from which the entry is no longer valid.
    pub fn expires_at(&self) -> u64 {
        self.stored_at.saturating_add(self.ttl_ms)
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now_ms`.
    ///
    /// Boundary condition: an entry is expired once `now_ms` reaches
    /// `stored_at + ttl_ms`. A zero TTL therefore expires immediately.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at()
    }
}
