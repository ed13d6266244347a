//! API Handlers
//!
//! HTTP request handlers for each report service endpoint. Read handlers
//! go through the TTL cache; write handlers invalidate the tenant's
//! cached results after the write lands.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{keys, SharedCache, TtlCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::forecast::{forecast_revenue, moving_average, predict_next_value};
use crate::ledger::{RevenueLedger, YearMonth};
use crate::models::{
    validate_tenant_id, ClearQuery, ClearResponse, ForecastQuery, ForecastResponse,
    HealthResponse, MonthlyPoint, MonthlyReportResponse, RecordRevenueRequest,
    RecordRevenueResponse, StatsResponse,
};

/// Header reporting whether a response was served from the cache
pub const X_CACHE: &str = "x-cache";

/// Window of the moving average included in forecast responses
const MOVING_AVERAGE_WINDOW: usize = 3;

/// Application state shared across all handlers.
///
/// Holds the one cache instance for the process alongside the ledger it
/// fronts.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    /// Revenue records, the source of truth behind the cache
    pub ledger: Arc<RwLock<RevenueLedger>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: TtlCache, config: Config) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            ledger: Arc::new(RwLock::new(RevenueLedger::new())),
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TtlCache::new(config.default_ttl_ms), config.clone())
    }
}

// == Cache Plumbing ==

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

fn cached_response(status: CacheStatus, body: Value, max_age_secs: u64) -> Response {
    (
        [
            (X_CACHE, status.as_str().to_string()),
            ("cache-control", format!("private, max-age={max_age_secs}")),
        ],
        Json(body),
    )
        .into_response()
}

/// Serves `key` from the cache, or computes it from the ledger and caches
/// the result.
///
/// The ledger read lock is held until the result is stored, so a write
/// cannot slip between computing and caching and leave a stale entry behind
/// after its invalidation.
async fn read_through<T, F>(state: &AppState, key: String, compute: F) -> Result<Response>
where
    T: Serialize,
    F: FnOnce(&RevenueLedger) -> Result<T>,
{
    let max_age = state.config.cache_max_age_secs();

    let cached = state.cache.write().await.get(&key);
    if let Some(body) = cached {
        return Ok(cached_response(CacheStatus::Hit, body, max_age));
    }

    let ledger = state.ledger.read().await;
    let body = serde_json::to_value(compute(&*ledger)?)?;
    state.cache.write().await.set(key.clone(), body.clone(), None);
    drop(ledger);

    debug!(key = %key, "cached freshly computed result");
    Ok(cached_response(CacheStatus::Miss, body, max_age))
}

fn check_tenant(tenant_id: &str) -> Result<()> {
    match validate_tenant_id(tenant_id) {
        Some(msg) => Err(AppError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

// == Handlers ==

/// Handler for POST /tenants/:tenant_id/revenue
///
/// Records a revenue entry, then drops every cached result whose key
/// mentions the tenant.
pub async fn record_revenue_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Json(req): Json<RecordRevenueRequest>,
) -> Result<(StatusCode, Json<RecordRevenueResponse>)> {
    check_tenant(&tenant_id)?;
    if let Some(msg) = req.validate() {
        return Err(AppError::InvalidRequest(msg));
    }

    let recorded_on = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let entries = state
        .ledger
        .write()
        .await
        .record(&tenant_id, req.amount, recorded_on);

    let invalidated = state.cache.write().await.clear(Some(&tenant_id));
    info!(
        tenant_id = %tenant_id,
        invalidated, "revenue recorded, tenant cache invalidated"
    );

    Ok((
        StatusCode::CREATED,
        Json(RecordRevenueResponse {
            tenant_id,
            entries,
            invalidated,
        }),
    ))
}

/// Handler for GET /tenants/:tenant_id/reports/monthly/:period
pub async fn monthly_report_handler(
    State(state): State<AppState>,
    Path((tenant_id, period)): Path<(String, String)>,
) -> Result<Response> {
    check_tenant(&tenant_id)?;
    let period: YearMonth = period.parse()?;

    let key = keys::monthly_report(&tenant_id, period);
    read_through(&state, key, |ledger| {
        let total = ledger.monthly_total(&tenant_id, period);
        Ok(MonthlyReportResponse {
            tenant_id: tenant_id.clone(),
            period: period.to_string(),
            total: total.total,
            entries: total.entries,
        })
    })
    .await
}

/// Handler for GET /tenants/:tenant_id/forecast
pub async fn forecast_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Response> {
    check_tenant(&tenant_id)?;
    let periods = query
        .periods(state.config.max_forecast_periods)
        .map_err(AppError::InvalidRequest)?;

    let key = keys::revenue_forecast(&tenant_id, periods);
    read_through(&state, key, |ledger| {
        let series = ledger.monthly_series(&tenant_id);
        if series.is_empty() {
            return Err(AppError::NotFound(format!(
                "No revenue recorded for tenant '{}'",
                tenant_id
            )));
        }

        let values: Vec<f64> = series.iter().map(|(_, total)| *total).collect();
        Ok(ForecastResponse {
            tenant_id: tenant_id.clone(),
            history: series
                .iter()
                .map(|(period, total)| MonthlyPoint {
                    period: period.to_string(),
                    total: *total,
                })
                .collect(),
            moving_average: moving_average(&values, MOVING_AVERAGE_WINDOW),
            next: predict_next_value(&values),
            forecast: forecast_revenue(&values, periods),
        })
    })
    .await
}

/// Handler for DELETE /cache
///
/// Without `pattern` the whole cache is flushed.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Json<ClearResponse> {
    let removed = state.cache.write().await.clear(query.pattern.as_deref());
    info!(pattern = ?query.pattern, removed, "cache cleared");

    Json(ClearResponse {
        pattern: query.pattern,
        removed,
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(stats.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
