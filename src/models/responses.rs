//! Response DTOs for the report service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::forecast::{Forecast, Prediction};

/// Response body for POST /tenants/:tenant_id/revenue
#[derive(Debug, Clone, Serialize)]
pub struct RecordRevenueResponse {
    pub tenant_id: String,
    /// Entries now held for the tenant
    pub entries: usize,
    /// Cache entries invalidated by this write
    pub invalidated: usize,
}

/// Response body for GET /tenants/:tenant_id/reports/monthly/:period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyReportResponse {
    pub tenant_id: String,
    /// `YYYY-MM`
    pub period: String,
    pub total: f64,
    pub entries: usize,
}

/// One month of history in a forecast response
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyPoint {
    pub period: String,
    pub total: f64,
}

/// Response body for GET /tenants/:tenant_id/forecast
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub tenant_id: String,
    pub history: Vec<MonthlyPoint>,
    /// Trailing three-month average over `history`
    pub moving_average: Vec<f64>,
    pub next: Prediction,
    pub forecast: Forecast,
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub pattern: Option<String>,
    pub removed: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
