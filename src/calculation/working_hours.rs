//! Standard working hours per month.
//!
//! Counts the weekday hours of a calendar month. Saturdays and Sundays are
//! the only days excluded; public holidays are not considered.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::Period;

/// Default length of a working day in hours.
pub const DEFAULT_WORKDAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Returns true for Monday through Friday.
///
/// # Example
///
/// ```
/// use contractor_billing::calculation::is_working_day;
/// use chrono::NaiveDate;
///
/// // 2023-03-03 is a Friday, 2023-03-04 a Saturday
/// assert!(is_working_day(NaiveDate::from_ymd_opt(2023, 3, 3).unwrap()));
/// assert!(!is_working_day(NaiveDate::from_ymd_opt(2023, 3, 4).unwrap()));
/// ```
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the standard working hours of a period.
///
/// Every weekday of the month contributes `workday_hours`.
///
/// # Arguments
///
/// * `period` - The month to count
/// * `workday_hours` - Hours in one working day (typically 8)
///
/// # Examples
///
/// ```
/// use contractor_billing::calculation::{count_working_hours, DEFAULT_WORKDAY_HOURS};
/// use contractor_billing::models::Period;
/// use rust_decimal::Decimal;
///
/// // March 2023 has 23 weekdays
/// let march = Period::new(2023, 3).unwrap();
/// assert_eq!(count_working_hours(march, DEFAULT_WORKDAY_HOURS), Decimal::from(184));
///
/// // February 2023 has 20 weekdays
/// let february = Period::new(2023, 2).unwrap();
/// assert_eq!(count_working_hours(february, DEFAULT_WORKDAY_HOURS), Decimal::from(160));
/// ```
pub fn count_working_hours(period: Period, workday_hours: Decimal) -> Decimal {
    period
        .days()
        .filter(|date| is_working_day(*date))
        .fold(Decimal::ZERO, |total, _| total + workday_hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn test_march_2023_has_184_hours() {
        assert_eq!(
            count_working_hours(period(2023, 3), DEFAULT_WORKDAY_HOURS),
            Decimal::from(184)
        );
    }

    #[test]
    fn test_february_2023_has_160_hours() {
        assert_eq!(
            count_working_hours(period(2023, 2), DEFAULT_WORKDAY_HOURS),
            Decimal::from(160)
        );
    }

    #[test]
    fn test_leap_february_2024_has_21_weekdays() {
        // 2024-02-29 is a Thursday
        assert_eq!(
            count_working_hours(period(2024, 2), DEFAULT_WORKDAY_HOURS),
            Decimal::from(168)
        );
    }

    #[test]
    fn test_month_starting_on_saturday() {
        // April 2023 starts on a Saturday and has 20 weekdays
        assert_eq!(
            count_working_hours(period(2023, 4), DEFAULT_WORKDAY_HOURS),
            Decimal::from(160)
        );
    }

    #[test]
    fn test_custom_workday_length() {
        let hours = count_working_hours(period(2023, 3), Decimal::from_str("7.5").unwrap());
        assert_eq!(hours, Decimal::from_str("172.5").unwrap());
    }

    #[test]
    fn test_zero_workday_gives_zero() {
        assert_eq!(count_working_hours(period(2023, 3), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_weekend_days_are_not_working_days() {
        let saturday = NaiveDate::from_ymd_opt(2023, 3, 4).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2023, 3, 5).unwrap();
        let monday = NaiveDate::from_ymd_opt(2023, 3, 6).unwrap();

        assert!(!is_working_day(saturday));
        assert!(!is_working_day(sunday));
        assert!(is_working_day(monday));
    }
}
