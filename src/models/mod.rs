//! Request and Response models for the report service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_tenant_id, ClearQuery, ForecastQuery, RecordRevenueRequest};
pub use responses::{
    ClearResponse, ForecastResponse, HealthResponse, MonthlyPoint, MonthlyReportResponse,
    RecordRevenueResponse, StatsResponse,
};
