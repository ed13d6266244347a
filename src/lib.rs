//! Tenant Cache - tenant-scoped revenue reports behind a TTL response cache
//!
//! Read endpoints memoize their results in an in-process TTL cache; writes
//! invalidate every cached result for the tenant by substring match.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod ledger;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
