//! Ledger Module
//!
//! Per-tenant revenue records that the report handlers aggregate. This is
//! the source of truth the cache sits in front of.

mod period;
mod revenue;

pub use period::{ParsePeriodError, YearMonth};
pub use revenue::{MonthlyTotal, RevenueEntry, RevenueLedger};
