//! Cache Module
//!
//! Provides an in-process TTL cache with lazy expiry and substring-pattern
//! invalidation.

mod clock;
mod entry;
pub mod keys;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Default entry lifetime: five minutes
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Cache handle shared between request handlers and the cleanup task.
pub type SharedCache = Arc<RwLock<TtlCache>>;
