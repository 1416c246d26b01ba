//! Billing period model.
//!
//! A [`Period`] names one calendar month. Billing records are unique per
//! contractor and period, and monthly reports are requested by period.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A (year, month) billing period.
///
/// A `Period` can only be built for a real calendar month, so every other
/// part of the engine can rely on it without re-validating.
///
/// # Example
///
/// ```
/// use contractor_billing::models::Period;
///
/// let period = Period::new(2023, 3).unwrap();
/// assert_eq!(period.year(), 2023);
/// assert_eq!(period.month(), 3);
/// assert_eq!(period.to_string(), "2023-03");
/// assert_eq!(period.days().count(), 31);
///
/// assert!(Period::new(2023, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PeriodParts", into = "PeriodParts")]
pub struct Period {
    first_day: NaiveDate,
}

/// Wire representation of a [`Period`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PeriodParts {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period for the given year and month (1 = January).
    ///
    /// Returns [`EngineError::InvalidPeriod`] if the month is outside 1..=12
    /// or the year is outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(EngineError::InvalidPeriod { year, month })
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Returns the month number (1 = January).
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Returns the first day of the period.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Iterates over every calendar date in the period, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month();
        self.first_day
            .iter_days()
            .take_while(move |date| date.month() == month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl TryFrom<PeriodParts> for Period {
    type Error = EngineError;

    fn try_from(parts: PeriodParts) -> Result<Self, Self::Error> {
        Period::new(parts.year, parts.month)
    }
}

impl From<Period> for PeriodParts {
    fn from(period: Period) -> Self {
        PeriodParts {
            year: period.year(),
            month: period.month(),
        }
    }
}
