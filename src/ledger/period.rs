//! Calendar month used to group revenue entries.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

// == Year Month ==
/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid period '{0}', expected YYYY-MM")]
pub struct ParsePeriodError(String);

impl YearMonth {
    /// Years representable as four `YYYY` digits
    pub const MIN_YEAR: i32 = 0;
    pub const MAX_YEAR: i32 = 9999;

    /// Returns `None` unless `month` is in 1..=12 and `year` fits `YYYY`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let valid =
            (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) && (1..=12).contains(&month);
        valid.then_some(Self { year, month })
    }

    /// Whether `date` falls in a year `YearMonth` can represent.
    pub fn covers(date: NaiveDate) -> bool {
        (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&date.year())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month immediately after this one.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePeriodError(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(err)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(err());
        }
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;

        Self::new(year, month).ok_or_else(err)
    }
}
