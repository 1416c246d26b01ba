//! Contractor remuneration calculation.
//!
//! This module computes what a contractor is paid for the hours worked in a
//! billing period. The rule is selected by the contract type.
//!
//! ## Rules
//!
//! **Employment**
//! - hours equal to the monthly limit: the monthly salary, as stored
//! - hours below the limit: hours × hourly rate, as computed
//! - hours above the limit: salary + overtime hours × rate × multiplier, rounded
//!
//! **Mandate**
//! - always hours × hourly rate, rounded
//!
//! **B2B**
//! - hours above the limit with paid overtime: salary + overtime premium, rounded
//! - otherwise hours × hourly rate, rounded (no premium)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RoundingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ContractTerms, ContractType};

use super::round_money;

/// Default overtime multiplier for new contractors.
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The remuneration rule that produced an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemunerationBranch {
    /// Employment, hours exactly at the limit: the monthly salary.
    EmploymentMonthlySalary,
    /// Employment, hours below the limit: hours × rate.
    EmploymentPartialMonth,
    /// Employment, hours above the limit: salary plus overtime.
    EmploymentOvertime,
    /// Mandate: hours × rate.
    MandateHourly,
    /// B2B, hours above the limit with paid overtime: salary plus overtime.
    B2bOvertime,
    /// B2B otherwise: hours × rate.
    B2bHourly,
}

impl RemunerationBranch {
    fn rule_id(&self) -> &'static str {
        match self {
            RemunerationBranch::EmploymentMonthlySalary => "employment_monthly_salary",
            RemunerationBranch::EmploymentPartialMonth => "employment_partial_month",
            RemunerationBranch::EmploymentOvertime => "employment_overtime",
            RemunerationBranch::MandateHourly => "mandate_hourly",
            RemunerationBranch::B2bOvertime => "b2b_overtime",
            RemunerationBranch::B2bHourly => "b2b_hourly",
        }
    }

    fn rule_name(&self) -> &'static str {
        match self {
            RemunerationBranch::EmploymentMonthlySalary => "Employment Monthly Salary",
            RemunerationBranch::EmploymentPartialMonth => "Employment Partial Month",
            RemunerationBranch::EmploymentOvertime => "Employment Salary With Overtime",
            RemunerationBranch::MandateHourly => "Mandate Hourly Pay",
            RemunerationBranch::B2bOvertime => "B2B Salary With Overtime",
            RemunerationBranch::B2bHourly => "B2B Hourly Pay",
        }
    }
}

/// The result of a remuneration calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemunerationResult {
    /// The amount paid to the contractor.
    pub amount: Decimal,
    /// The rule that produced the amount.
    pub branch: RemunerationBranch,
    /// Hours paid at the overtime premium (zero unless an overtime rule applied).
    pub overtime_hours: Decimal,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Calculates a contractor's pay for the hours worked in one period.
///
/// # Arguments
///
/// * `worked_hours` - Hours worked in the period (must not be negative)
/// * `terms` - The contract terms snapshot to pay by
/// * `rounding` - The rounding policy
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `worked_hours` is negative.
///
/// # Examples
///
/// ## Employment with overtime
///
/// ```
/// use contractor_billing::calculation::{calculate_remuneration, RemunerationBranch};
/// use contractor_billing::config::RoundingConfig;
/// use contractor_billing::models::{ContractTerms, ContractType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut terms = ContractTerms::new(
///     ContractType::Employment,
///     Decimal::from_str("59.53").unwrap(),
///     168,
///     Decimal::from_str("1.5").unwrap(),
///     false,
///     Decimal::from_str("85.00").unwrap(),
/// ).unwrap();
/// terms.monthly_earnings = Decimal::from_str("10005.04").unwrap();
///
/// let result = calculate_remuneration(
///     Decimal::from(176),
///     &terms,
///     &RoundingConfig::default(),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.branch, RemunerationBranch::EmploymentOvertime);
/// assert_eq!(result.overtime_hours, Decimal::from(8));
/// assert_eq!(result.amount, Decimal::from_str("10719.40").unwrap());
/// ```
///
/// ## B2B without paid overtime
///
/// ```
/// use contractor_billing::calculation::{calculate_remuneration, RemunerationBranch};
/// use contractor_billing::config::RoundingConfig;
/// use contractor_billing::models::{ContractTerms, ContractType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let terms = ContractTerms::new(
///     ContractType::B2b,
///     Decimal::from_str("59.53").unwrap(),
///     168,
///     Decimal::from_str("1.5").unwrap(),
///     false,
///     Decimal::from_str("85.00").unwrap(),
/// ).unwrap();
///
/// let result = calculate_remuneration(
///     Decimal::from(176),
///     &terms,
///     &RoundingConfig::default(),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.branch, RemunerationBranch::B2bHourly);
/// assert_eq!(result.amount, Decimal::from_str("10477.28").unwrap());
/// ```
pub fn calculate_remuneration(
    worked_hours: Decimal,
    terms: &ContractTerms,
    rounding: &RoundingConfig,
    step_number: u32,
) -> EngineResult<RemunerationResult> {
    if worked_hours < Decimal::ZERO {
        return Err(EngineError::negative("worked_hours", worked_hours));
    }

    let limit = Decimal::from(terms.monthly_hour_limit);
    let hourly_pay = worked_hours
        .checked_mul(terms.hourly_rate)
        .ok_or_else(|| EngineError::overflow("worked_hours"))?;

    let (branch, amount, overtime_hours) = match terms.contract_type {
        ContractType::Employment => {
            if worked_hours == limit {
                (
                    RemunerationBranch::EmploymentMonthlySalary,
                    exact_amount(terms.monthly_earnings, rounding),
                    Decimal::ZERO,
                )
            } else if worked_hours < limit {
                (
                    RemunerationBranch::EmploymentPartialMonth,
                    exact_amount(hourly_pay, rounding),
                    Decimal::ZERO,
                )
            } else {
                let overtime_hours = worked_hours - limit;
                (
                    RemunerationBranch::EmploymentOvertime,
                    round_money(salary_with_overtime(overtime_hours, terms)?),
                    overtime_hours,
                )
            }
        }
        ContractType::Mandate => (
            RemunerationBranch::MandateHourly,
            round_money(hourly_pay),
            Decimal::ZERO,
        ),
        ContractType::B2b => {
            if worked_hours > limit && terms.overtime_paid {
                let overtime_hours = worked_hours - limit;
                (
                    RemunerationBranch::B2bOvertime,
                    round_money(salary_with_overtime(overtime_hours, terms)?),
                    overtime_hours,
                )
            } else {
                (
                    RemunerationBranch::B2bHourly,
                    round_money(hourly_pay),
                    Decimal::ZERO,
                )
            }
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: branch.rule_id().to_string(),
        rule_name: branch.rule_name().to_string(),
        input: serde_json::json!({
            "contract_type": terms.contract_type.to_string(),
            "worked_hours": worked_hours.normalize().to_string(),
            "hourly_rate": terms.hourly_rate.normalize().to_string(),
            "monthly_hour_limit": terms.monthly_hour_limit,
            "monthly_earnings": terms.monthly_earnings.normalize().to_string(),
            "overtime_multiplier": terms.overtime_multiplier.normalize().to_string(),
            "overtime_paid": terms.overtime_paid
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "overtime_hours": overtime_hours.normalize().to_string()
        }),
        reasoning: reasoning(branch, worked_hours, overtime_hours, terms, amount),
    };

    Ok(RemunerationResult {
        amount,
        branch,
        overtime_hours,
        audit_step,
    })
}

/// Monthly salary + overtime hours × hourly rate × overtime multiplier.
fn salary_with_overtime(overtime_hours: Decimal, terms: &ContractTerms) -> EngineResult<Decimal> {
    overtime_hours
        .checked_mul(terms.hourly_rate)
        .and_then(|pay| pay.checked_mul(terms.overtime_multiplier))
        .and_then(|pay| pay.checked_add(terms.monthly_earnings))
        .ok_or_else(|| EngineError::overflow("worked_hours"))
}

/// Amounts the employment rules pass through unrounded unless configured otherwise.
fn exact_amount(amount: Decimal, rounding: &RoundingConfig) -> Decimal {
    if rounding.round_exact_employment_branches {
        round_money(amount)
    } else {
        amount
    }
}

fn reasoning(
    branch: RemunerationBranch,
    worked_hours: Decimal,
    overtime_hours: Decimal,
    terms: &ContractTerms,
    amount: Decimal,
) -> String {
    let hours = worked_hours.normalize();
    let rate = terms.hourly_rate.normalize();
    let limit = terms.monthly_hour_limit;

    match branch {
        RemunerationBranch::EmploymentMonthlySalary => format!(
            "{} hours equals the {} hour monthly limit: monthly salary ${}",
            hours, limit, amount
        ),
        RemunerationBranch::EmploymentPartialMonth => format!(
            "{} hours is below the {} hour monthly limit: {} hours × ${} = ${}",
            hours, limit, hours, rate, amount
        ),
        RemunerationBranch::EmploymentOvertime | RemunerationBranch::B2bOvertime => format!(
            "{} hours exceeds the {} hour monthly limit: salary ${} + {} overtime hours × ${} × {} = ${}",
            hours,
            limit,
            terms.monthly_earnings.normalize(),
            overtime_hours.normalize(),
            rate,
            terms.overtime_multiplier.normalize(),
            amount
        ),
        RemunerationBranch::MandateHourly => {
            format!("Mandate pays every hour at the base rate: {} hours × ${} = ${}", hours, rate, amount)
        }
        RemunerationBranch::B2bHourly => format!(
            "B2B without an overtime premium: {} hours × ${} = ${}",
            hours, rate, amount
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Terms used throughout the worked examples: 59.53/h, 168h limit,
    /// baseline 10005.04 as stored on the contractor.
    fn create_terms(contract_type: ContractType, overtime_paid: bool) -> ContractTerms {
        let mut terms = ContractTerms::new(
            contract_type,
            dec("59.53"),
            168,
            dec("1.5"),
            overtime_paid,
            dec("85.00"),
        ).unwrap();
        terms.monthly_earnings = dec("10005.04");
        terms
    }

    fn remuneration(worked_hours: &str, terms: &ContractTerms) -> RemunerationResult {
        calculate_remuneration(dec(worked_hours), terms, &RoundingConfig::default(), 1).unwrap()
    }

    // ==========================================================================
    // Employment
    // ==========================================================================

    #[test]
    fn test_employment_at_limit_pays_monthly_earnings() {
        let terms = create_terms(ContractType::Employment, false);
        let result = remuneration("168", &terms);

        assert_eq!(result.branch, RemunerationBranch::EmploymentMonthlySalary);
        assert_eq!(result.amount, dec("10005.04"));
        assert_eq!(result.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_employment_at_limit_returns_baseline_unrounded() {
        let mut terms = create_terms(ContractType::Employment, false);
        terms.monthly_earnings = dec("10001.045");

        let result = remuneration("168", &terms);
        assert_eq!(result.amount, dec("10001.045"));
    }

    #[test]
    fn test_employment_below_limit_pays_hours_times_rate() {
        let terms = create_terms(ContractType::Employment, false);
        let result = remuneration("160", &terms);

        assert_eq!(result.branch, RemunerationBranch::EmploymentPartialMonth);
        assert_eq!(result.amount, dec("9524.80"));
    }

    #[test]
    fn test_employment_below_limit_is_not_rounded() {
        let terms = create_terms(ContractType::Employment, false);
        let result = remuneration("160.5", &terms);

        // 160.5 × 59.53 = 9554.565
        assert_eq!(result.amount, dec("9554.565"));
    }

    #[test]
    fn test_employment_exact_branches_rounded_when_configured() {
        let terms = create_terms(ContractType::Employment, false);
        let rounding = RoundingConfig {
            round_exact_employment_branches: true,
            ..RoundingConfig::default()
        };

        let result = calculate_remuneration(dec("160.5"), &terms, &rounding, 1).unwrap();
        assert_eq!(result.amount, dec("9554.57"));
    }

    #[test]
    fn test_employment_above_limit_adds_overtime() {
        let terms = create_terms(ContractType::Employment, false);
        let result = remuneration("176", &terms);

        // 8h × 59.53 × 1.5 = 714.36
        assert_eq!(result.branch, RemunerationBranch::EmploymentOvertime);
        assert_eq!(result.overtime_hours, dec("8"));
        assert_eq!(result.amount, dec("10719.40"));
        assert_eq!(result.amount.to_string(), "10719.40");
    }

    #[test]
    fn test_employment_overtime_ignores_overtime_paid_flag() {
        let paid = remuneration("176", &create_terms(ContractType::Employment, true));
        let unpaid = remuneration("176", &create_terms(ContractType::Employment, false));
        assert_eq!(paid.amount, unpaid.amount);
    }

    #[test]
    fn test_employment_overtime_rounds_half_up() {
        let terms = create_terms(ContractType::Employment, false);
        // 0.1h × 59.53 × 1.5 = 8.9295 → 10005.04 + 8.9295 = 10013.9695 → 10013.97
        let result = remuneration("168.1", &terms);
        assert_eq!(result.amount, dec("10013.97"));
    }

    // ==========================================================================
    // Mandate
    // ==========================================================================

    #[test]
    fn test_mandate_pays_hours_times_rate() {
        let terms = create_terms(ContractType::Mandate, false);
        let result = remuneration("160", &terms);

        assert_eq!(result.branch, RemunerationBranch::MandateHourly);
        assert_eq!(result.amount, dec("9524.80"));
    }

    #[test]
    fn test_mandate_has_no_overtime_above_limit() {
        let terms = create_terms(ContractType::Mandate, true);
        let result = remuneration("200", &terms);

        assert_eq!(result.branch, RemunerationBranch::MandateHourly);
        assert_eq!(result.overtime_hours, Decimal::ZERO);
        assert_eq!(result.amount, dec("11906.00"));
    }

    #[test]
    fn test_mandate_rounds_half_up() {
        let terms = create_terms(ContractType::Mandate, false);
        // 0.5 × 59.53 = 29.765 → 29.77
        assert_eq!(remuneration("0.5", &terms).amount, dec("29.77"));
    }

    // ==========================================================================
    // B2B
    // ==========================================================================

    #[test]
    fn test_b2b_over_limit_without_paid_overtime_is_flat_hourly() {
        let terms = create_terms(ContractType::B2b, false);
        let result = remuneration("176", &terms);

        // 176 × 59.53 = 10477.28
        assert_eq!(result.branch, RemunerationBranch::B2bHourly);
        assert_eq!(result.amount, dec("10477.28"));
        assert_eq!(result.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_b2b_over_limit_with_paid_overtime_adds_premium() {
        let terms = create_terms(ContractType::B2b, true);
        let result = remuneration("176", &terms);

        assert_eq!(result.branch, RemunerationBranch::B2bOvertime);
        assert_eq!(result.overtime_hours, dec("8"));
        assert_eq!(result.amount, dec("10719.40"));
    }

    #[test]
    fn test_b2b_at_limit_with_paid_overtime_is_hourly() {
        let terms = create_terms(ContractType::B2b, true);
        let result = remuneration("168", &terms);

        // 168 × 59.53 = 10001.04, not the stored baseline
        assert_eq!(result.branch, RemunerationBranch::B2bHourly);
        assert_eq!(result.amount, dec("10001.04"));
    }

    #[test]
    fn test_b2b_under_limit_is_hourly() {
        let terms = create_terms(ContractType::B2b, true);
        assert_eq!(remuneration("100", &terms).amount, dec("5953.00"));
    }

    // ==========================================================================
    // Errors and audit
    // ==========================================================================

    #[test]
    fn test_negative_hours_are_rejected() {
        let terms = create_terms(ContractType::Mandate, false);
        let result = calculate_remuneration(dec("-0.5"), &terms, &RoundingConfig::default(), 1);

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "worked_hours"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_hours_out_of_decimal_range_are_rejected() {
        for contract_type in [ContractType::Employment, ContractType::Mandate, ContractType::B2b] {
            let terms = create_terms(contract_type, true);
            let result = calculate_remuneration(Decimal::MAX, &terms, &RoundingConfig::default(), 1);

            match result {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "worked_hours"),
                other => panic!("Expected InvalidInput for {}, got {:?}", contract_type, other),
            }
        }
    }

    #[test]
    fn test_overtime_premium_out_of_range_is_rejected() {
        let mut terms = create_terms(ContractType::Employment, false);
        terms.overtime_multiplier = dec("1000000000000000000000000000");

        let result = calculate_remuneration(dec("176"), &terms, &RoundingConfig::default(), 1);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));

        // at the limit no premium is computed
        assert!(calculate_remuneration(dec("168"), &terms, &RoundingConfig::default(), 1).is_ok());
    }

    #[test]
    fn test_audit_step_records_rule_and_figures() {
        let terms = create_terms(ContractType::Employment, false);
        let result = calculate_remuneration(dec("176"), &terms, &RoundingConfig::default(), 4).unwrap();
        let step = &result.audit_step;

        assert_eq!(step.step_number, 4);
        assert_eq!(step.rule_id, "employment_overtime");
        assert_eq!(step.input["contract_type"], "employment");
        assert_eq!(step.input["worked_hours"], "176");
        assert_eq!(step.input["monthly_hour_limit"], 168);
        assert_eq!(step.output["amount"], "10719.40");
        assert_eq!(step.output["overtime_hours"], "8");
        assert!(step.reasoning.contains("8 overtime hours"));
    }

    #[test]
    fn test_audit_reasoning_for_b2b_flat_rate() {
        let terms = create_terms(ContractType::B2b, false);
        let result = remuneration("176", &terms);
        assert_eq!(
            result.audit_step.reasoning,
            "B2B without an overtime premium: 176 hours × $59.53 = $10477.28"
        );
    }

    // ==========================================================================
    // Properties
    // ==========================================================================

    fn contract_type_strategy() -> impl Strategy<Value = ContractType> {
        prop_oneof![
            Just(ContractType::Employment),
            Just(ContractType::Mandate),
            Just(ContractType::B2b),
        ]
    }

    /// Terms with a consistent baseline; rate and multiplier in cents/hundredths.
    fn terms_strategy() -> impl Strategy<Value = ContractTerms> {
        (
            contract_type_strategy(),
            0i64..20_000,
            0u32..250,
            0i64..400,
            any::<bool>(),
        )
            .prop_map(|(contract_type, rate_cents, limit, multiplier, overtime_paid)| {
                ContractTerms::new(
                    contract_type,
                    Decimal::new(rate_cents, 2),
                    limit,
                    Decimal::new(multiplier, 2),
                    overtime_paid,
                    Decimal::new(rate_cents * 2, 2),
                ).unwrap()
            })
    }

    /// Hours with one decimal place, up to 400.0.
    fn hours_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..4_000).prop_map(|tenths| Decimal::new(tenths, 1))
    }

    proptest! {
        #[test]
        fn prop_zero_hours_pay_nothing(terms in terms_strategy()) {
            let result = calculate_remuneration(Decimal::ZERO, &terms, &RoundingConfig::default(), 1).unwrap();
            prop_assert_eq!(result.amount, Decimal::ZERO);
        }

        #[test]
        fn prop_calculation_is_deterministic(terms in terms_strategy(), hours in hours_strategy()) {
            let first = calculate_remuneration(hours, &terms, &RoundingConfig::default(), 1).unwrap();
            let second = calculate_remuneration(hours, &terms, &RoundingConfig::default(), 1).unwrap();
            prop_assert_eq!(first.amount.serialize(), second.amount.serialize());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_mandate_is_rounded_hours_times_rate(terms in terms_strategy(), hours in hours_strategy()) {
            let terms = ContractTerms { contract_type: ContractType::Mandate, ..terms };
            let result = calculate_remuneration(hours, &terms, &RoundingConfig::default(), 1).unwrap();
            prop_assert_eq!(result.amount, round_money(hours * terms.hourly_rate));
        }

        #[test]
        fn prop_employment_overtime_formula(terms in terms_strategy(), extra in 1i64..800) {
            let terms = ContractTerms { contract_type: ContractType::Employment, ..terms };
            let limit = Decimal::from(terms.monthly_hour_limit);
            let hours = limit + Decimal::new(extra, 1);

            let result = calculate_remuneration(hours, &terms, &RoundingConfig::default(), 1).unwrap();
            let expected = round_money(
                terms.monthly_earnings + (hours - limit) * terms.hourly_rate * terms.overtime_multiplier,
            );
            prop_assert_eq!(result.amount, expected);
        }

        #[test]
        fn prop_b2b_without_paid_overtime_never_pays_premium(terms in terms_strategy(), hours in hours_strategy()) {
            let terms = ContractTerms { contract_type: ContractType::B2b, overtime_paid: false, ..terms };
            let result = calculate_remuneration(hours, &terms, &RoundingConfig::default(), 1).unwrap();
            prop_assert_eq!(result.branch, RemunerationBranch::B2bHourly);
            prop_assert_eq!(result.amount, round_money(hours * terms.hourly_rate));
        }
    }
}
