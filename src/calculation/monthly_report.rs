//! Monthly report aggregation.
//!
//! Combines every billing record of a period with the period's standard
//! working hours into a [`MonthlyReport`].

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BillingRecord, MonthlyReport, Period};

use super::count_working_hours;

/// Builds the financial summary for one period.
///
/// Only records whose period equals `period` are included; others are
/// skipped. Totals are summed in decimal arithmetic.
///
/// # Arguments
///
/// * `period` - The reported month
/// * `records` - Candidate billing records
/// * `workday_hours` - Hours in a standard working day
///
/// # Errors
///
/// Returns [`EngineError::PeriodNotFound`] when no record belongs to the
/// period. An empty period is reported as missing data rather than as a
/// report with zero totals. Returns [`EngineError::InvalidInput`] when a
/// total does not fit in a [`Decimal`].
///
/// # Example
///
/// ```
/// use contractor_billing::calculation::{build_monthly_report, DEFAULT_WORKDAY_HOURS};
/// use contractor_billing::error::EngineError;
/// use contractor_billing::models::Period;
///
/// let period = Period::new(2024, 12).unwrap();
/// let result = build_monthly_report(period, &[], DEFAULT_WORKDAY_HOURS);
/// assert!(matches!(result, Err(EngineError::PeriodNotFound { .. })));
/// ```
pub fn build_monthly_report(
    period: Period,
    records: &[BillingRecord],
    workday_hours: Decimal,
) -> EngineResult<MonthlyReport> {
    let records: Vec<BillingRecord> = records
        .iter()
        .filter(|record| record.period() == period)
        .cloned()
        .collect();

    if records.is_empty() {
        return Err(EngineError::PeriodNotFound { period });
    }

    let total_expense = checked_total(&records, "total_expense", BillingRecord::contractor_remuneration)?;
    let total_income = checked_total(&records, "total_income", BillingRecord::client_charge)?;
    let total_profit = total_income
        .checked_sub(total_expense)
        .ok_or_else(|| EngineError::overflow("total_profit"))?;

    Ok(MonthlyReport {
        period,
        working_hours: count_working_hours(period, workday_hours),
        total_expense,
        total_income,
        total_profit,
        records,
    })
}

fn checked_total(
    records: &[BillingRecord],
    field: &str,
    amount: fn(&BillingRecord) -> Decimal,
) -> EngineResult<Decimal> {
    records.iter().try_fold(Decimal::ZERO, |total, record| {
        total
            .checked_add(amount(record))
            .ok_or_else(|| EngineError::overflow(field))
    })
}
