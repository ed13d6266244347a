//! Cache key builders.
//!
//! Keys follow `<namespace>:<resource>:<tenant_id>[:<subkey>]` so that
//! `clear(tenant_id)` reaches every cached result for a tenant.

use crate::ledger::YearMonth;

pub const KEY_SEPARATOR: char = ':';

/// Key for a tenant's revenue total in one month.
pub fn monthly_report(tenant_id: &str, period: YearMonth) -> String {
    format!("report:monthly:{tenant_id}:{period}")
}

/// Key for a tenant's revenue forecast over `periods` months.
pub fn revenue_forecast(tenant_id: &str, periods: usize) -> String {
    format!("forecast:revenue:{tenant_id}:{periods}")
}
