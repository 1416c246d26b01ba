//! Monthly report model.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{BillingRecord, Period};

/// Financial summary of every billing record in one period.
///
/// Reports are built on demand by
/// [`build_monthly_report`](crate::calculation::build_monthly_report) and are
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    /// The reported period.
    pub period: Period,
    /// Standard weekday working hours in the period.
    pub working_hours: Decimal,
    /// Sum of contractor remuneration.
    pub total_expense: Decimal,
    /// Sum of client charges.
    pub total_income: Decimal,
    /// Total income minus total expense.
    pub total_profit: Decimal,
    /// The records the totals were computed from.
    pub records: Vec<BillingRecord>,
}
