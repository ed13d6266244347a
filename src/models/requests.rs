//! Request DTOs for the report service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::ledger::YearMonth;

/// Longest accepted tenant id, in bytes
pub const MAX_TENANT_ID_LENGTH: usize = 128;

/// Validates a tenant id taken from the path.
///
/// Returns an error message if validation fails, None if valid. The key
/// separator is rejected so a tenant id always occupies its own key segment.
pub fn validate_tenant_id(tenant_id: &str) -> Option<String> {
    if tenant_id.is_empty() {
        return Some("Tenant id cannot be empty".to_string());
    }
    if tenant_id.len() > MAX_TENANT_ID_LENGTH {
        return Some(format!(
            "Tenant id exceeds maximum length of {} bytes",
            MAX_TENANT_ID_LENGTH
        ));
    }
    if tenant_id.contains(crate::cache::keys::KEY_SEPARATOR) {
        return Some("Tenant id cannot contain ':'".to_string());
    }
    None
}

/// Request body for recording revenue (POST /tenants/:tenant_id/revenue)
///
/// # Fields
/// - `amount`: Revenue amount, finite and non-negative
/// - `date`: Optional `YYYY-MM-DD` the revenue belongs to (defaults to today, UTC)
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRevenueRequest {
    pub amount: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl RecordRevenueRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !self.amount.is_finite() {
            return Some("Amount must be a finite number".to_string());
        }
        if self.amount < 0.0 {
            return Some("Amount cannot be negative".to_string());
        }
        if let Some(date) = self.date {
            if !YearMonth::covers(date) {
                return Some(format!(
                    "Date year must be between {} and {}",
                    YearMonth::MIN_YEAR,
                    YearMonth::MAX_YEAR
                ));
            }
        }
        None
    }
}

/// Query string for GET /tenants/:tenant_id/forecast
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastQuery {
    /// Months to forecast (default 3)
    #[serde(default)]
    pub periods: Option<usize>,
}

impl ForecastQuery {
    pub const DEFAULT_PERIODS: usize = 3;

    /// Resolves the requested horizon, or an error message if it falls
    /// outside `1..=max_periods`.
    pub fn periods(&self, max_periods: usize) -> Result<usize, String> {
        let periods = self.periods.unwrap_or(Self::DEFAULT_PERIODS);
        if periods == 0 || periods > max_periods {
            return Err(format!("Periods must be between 1 and {}", max_periods));
        }
        Ok(periods)
    }
}

/// Query string for DELETE /cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearQuery {
    /// Substring to match; absent flushes everything
    #[serde(default)]
    pub pattern: Option<String>,
}
