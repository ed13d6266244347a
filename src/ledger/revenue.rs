//! In-memory revenue ledger, grouped per tenant.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::YearMonth;

// == Revenue Entry ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueEntry {
    pub amount: f64,
    pub recorded_on: NaiveDate,
}

/// Aggregate of one tenant's entries in one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub total: f64,
    pub entries: usize,
}

// == Revenue Ledger ==
/// Revenue entries keyed by tenant id.
#[derive(Debug, Default)]
pub struct RevenueLedger {
    tenants: HashMap<String, Vec<RevenueEntry>>,
}

impl RevenueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry for `tenant_id` and returns how many entries the
    /// tenant now holds.
    pub fn record(&mut self, tenant_id: &str, amount: f64, recorded_on: NaiveDate) -> usize {
        let entries = self.tenants.entry(tenant_id.to_string()).or_default();
        entries.push(RevenueEntry {
            amount,
            recorded_on,
        });
        entries.len()
    }

    /// Sums a tenant's entries falling in `period`.
    pub fn monthly_total(&self, tenant_id: &str, period: YearMonth) -> MonthlyTotal {
        self.entries(tenant_id)
            .iter()
            .filter(|e| YearMonth::from_date(e.recorded_on) == period)
            .fold(MonthlyTotal::default(), |acc, e| MonthlyTotal {
                total: acc.total + e.amount,
                entries: acc.entries + 1,
            })
    }

    /// Monthly totals from the tenant's first recorded month to its last,
    /// with months lacking entries reported as zero.
    pub fn monthly_series(&self, tenant_id: &str) -> Vec<(YearMonth, f64)> {
        let mut totals: HashMap<YearMonth, f64> = HashMap::new();
        for entry in self.entries(tenant_id) {
            *totals.entry(YearMonth::from_date(entry.recorded_on)).or_default() += entry.amount;
        }

        let (Some(first), Some(last)) = (totals.keys().min().copied(), totals.keys().max().copied())
        else {
            return Vec::new();
        };

        let mut series = Vec::new();
        let mut month = first;
        while month <= last {
            series.push((month, totals.get(&month).copied().unwrap_or(0.0)));
            month = month.next();
        }
        series
    }

    pub fn entries(&self, tenant_id: &str) -> &[RevenueEntry] {
        self.tenants.get(tenant_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
