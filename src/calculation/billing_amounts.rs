//! Derived money fields of a billing record.
//!
//! Runs the remuneration, client charge and profit calculations together so
//! a billing record either gets all three fields or none of them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, ContractTerms};

use super::{RemunerationBranch, calculate_client_charge, calculate_profit, calculate_remuneration};

/// The three derived money fields of a billing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAmounts {
    /// Amount paid to the contractor.
    pub contractor_remuneration: Decimal,
    /// Amount charged to the client.
    pub client_charge: Decimal,
    /// `client_charge - contractor_remuneration`.
    pub profit: Decimal,
    /// The remuneration rule that was applied.
    pub remuneration_branch: RemunerationBranch,
}

/// Billing amounts together with the audit steps that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCalculation {
    /// The computed amounts.
    pub amounts: BillingAmounts,
    /// Audit steps in calculation order: remuneration, client charge, profit.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes remuneration, client charge and profit for one billing.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// if `worked_hours` or the client hour price is negative, or if any amount
/// does not fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use contractor_billing::calculation::calculate_billing_amounts;
/// use contractor_billing::config::EngineConfig;
/// use contractor_billing::models::{ContractTerms, ContractType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let terms = ContractTerms::new(
///     ContractType::Mandate,
///     Decimal::from_str("59.53").unwrap(),
///     168,
///     Decimal::from_str("1.5").unwrap(),
///     false,
///     Decimal::from_str("85.00").unwrap(),
/// ).unwrap();
///
/// let calculation =
///     calculate_billing_amounts(Decimal::from(160), &terms, &EngineConfig::default()).unwrap();
/// let amounts = calculation.amounts;
/// assert_eq!(amounts.contractor_remuneration, Decimal::from_str("9524.80").unwrap());
/// assert_eq!(amounts.client_charge, Decimal::from_str("13600.00").unwrap());
/// assert_eq!(amounts.profit, Decimal::from_str("4075.20").unwrap());
/// ```
pub fn calculate_billing_amounts(
    worked_hours: Decimal,
    terms: &ContractTerms,
    config: &EngineConfig,
) -> EngineResult<BillingCalculation> {
    let remuneration = calculate_remuneration(worked_hours, terms, &config.rounding, 1)?;
    let client_charge =
        calculate_client_charge(worked_hours, terms.client_hour_price, &config.rounding)?;
    let profit = calculate_profit(client_charge, remuneration.amount)?;

    let charge_step = AuditStep {
        step_number: 2,
        rule_id: "client_charge".to_string(),
        rule_name: "Client Charge".to_string(),
        input: serde_json::json!({
            "worked_hours": worked_hours.normalize().to_string(),
            "client_hour_price": terms.client_hour_price.normalize().to_string(),
            "rounded": config.rounding.round_client_charge
        }),
        output: serde_json::json!({
            "amount": client_charge.to_string()
        }),
        reasoning: format!(
            "{} hours × ${} = ${}",
            worked_hours.normalize(),
            terms.client_hour_price.normalize(),
            client_charge
        ),
    };

    let profit_step = AuditStep {
        step_number: 3,
        rule_id: "profit".to_string(),
        rule_name: "Profit".to_string(),
        input: serde_json::json!({
            "client_charge": client_charge.to_string(),
            "contractor_remuneration": remuneration.amount.to_string()
        }),
        output: serde_json::json!({
            "amount": profit.to_string()
        }),
        reasoning: format!(
            "Client charge ${} - remuneration ${} = ${}",
            client_charge, remuneration.amount, profit
        ),
    };

    Ok(BillingCalculation {
        amounts: BillingAmounts {
            contractor_remuneration: remuneration.amount,
            client_charge,
            profit,
            remuneration_branch: remuneration.branch,
        },
        audit_steps: vec![remuneration.audit_step, charge_step, profit_step],
    })
}
