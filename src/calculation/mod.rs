//! Calculation logic for the contractor billing engine.
//!
//! This module contains the pure calculation functions: money rounding,
//! standard working hours per month, contractor remuneration by contract
//! type, client charge, profit, the combination of the three for a billing
//! record, and the monthly report aggregation.

mod billing_amounts;
mod client_charge;
mod monthly_report;
mod profit;
mod remuneration;
mod rounding;
mod working_hours;

pub use billing_amounts::{BillingAmounts, BillingCalculation, calculate_billing_amounts};
pub use client_charge::calculate_client_charge;
pub use monthly_report::build_monthly_report;
pub use profit::calculate_profit;
pub use remuneration::{
    DEFAULT_OVERTIME_MULTIPLIER, RemunerationBranch, RemunerationResult, calculate_remuneration,
};
pub use rounding::{MONEY_SCALE, round_money};
pub use working_hours::{DEFAULT_WORKDAY_HOURS, count_working_hours, is_working_day};
