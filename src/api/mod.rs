//! API Module
//!
//! HTTP handlers and routing for the report service.
//!
//! # Endpoints
//! - `POST /tenants/:tenant_id/revenue` - Record revenue
//! - `GET /tenants/:tenant_id/reports/monthly/:period` - Monthly revenue total
//! - `GET /tenants/:tenant_id/forecast` - Revenue forecast
//! - `DELETE /cache` - Invalidate cached results
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
