//! API Routes
//!
//! Configures the Axum router with all report service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, forecast_handler, health_handler, monthly_report_handler,
    record_revenue_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /tenants/:tenant_id/revenue` - Record revenue, invalidate tenant cache
/// - `GET /tenants/:tenant_id/reports/monthly/:period` - Cached monthly total
/// - `GET /tenants/:tenant_id/forecast` - Cached revenue forecast
/// - `DELETE /cache` - Clear by substring pattern, or everything
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tenants/:tenant_id/revenue", post(record_revenue_handler))
        .route(
            "/tenants/:tenant_id/reports/monthly/:period",
            get(monthly_report_handler),
        )
        .route("/tenants/:tenant_id/forecast", get(forecast_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
