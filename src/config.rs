//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_TTL_MS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in milliseconds for cached reports
    pub default_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 leaves expiry lazy-only
    pub cleanup_interval: u64,
    /// Largest accepted `periods` for the forecast endpoint
    pub max_forecast_periods: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL_MS` - Cache entry TTL in milliseconds (default: 300000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds, 0 disables (default: 60)
    /// - `MAX_FORECAST_PERIODS` - Forecast horizon limit (default: 12)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl_ms: env_or("DEFAULT_TTL_MS", defaults.default_ttl_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            max_forecast_periods: env_or("MAX_FORECAST_PERIODS", defaults.max_forecast_periods),
        }
    }

    /// `max-age` advertised on cached responses, in whole seconds.
    pub fn cache_max_age_secs(&self) -> u64 {
        self.default_ttl_ms / 1000
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_TTL_MS,
            server_port: 3000,
            cleanup_interval: 60,
            max_forecast_periods: 12,
        }
    }
}
