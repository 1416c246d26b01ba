//! Billing record model.
//!
//! A [`BillingRecord`] holds one contractor's worked hours for one period
//! together with the three derived money fields. The derived fields are only
//! ever produced by [`calculate_billing_amounts`], so
//! `profit == client_charge - contractor_remuneration` holds for every record.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculation::{BillingAmounts, calculate_billing_amounts};
use crate::config::EngineConfig;
use crate::error::EngineResult;

use super::{AuditStep, ContractTerms, Period};

/// A computed billing that has not been given a store identifier yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingDraft {
    contractor_id: u32,
    period: Period,
    worked_hours: Decimal,
    terms: ContractTerms,
    amounts: BillingAmounts,
    audit_trail: Vec<AuditStep>,
}

impl BillingDraft {
    /// Computes the derived fields for a contractor's hours in a period.
    ///
    /// `terms` is the snapshot the amounts are computed from; it is kept on
    /// the record so later hour corrections use the same terms.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
    /// if `worked_hours` is negative.
    pub fn compute(
        contractor_id: u32,
        period: Period,
        worked_hours: Decimal,
        terms: ContractTerms,
        config: &EngineConfig,
    ) -> EngineResult<Self> {
        let calculation = calculate_billing_amounts(worked_hours, &terms, config)?;
        Ok(Self {
            contractor_id,
            period,
            worked_hours,
            terms,
            amounts: calculation.amounts,
            audit_trail: calculation.audit_steps,
        })
    }

    /// The contractor being billed.
    pub fn contractor_id(&self) -> u32 {
        self.contractor_id
    }

    /// The billed period.
    pub fn period(&self) -> Period {
        self.period
    }

    /// The derived money fields.
    pub fn amounts(&self) -> &BillingAmounts {
        &self.amounts
    }

    /// Attaches a store-assigned identifier, producing the final record.
    pub fn into_record(self, id: u32) -> BillingRecord {
        BillingRecord {
            id,
            contractor_id: self.contractor_id,
            period: self.period,
            worked_hours: self.worked_hours,
            terms: self.terms,
            amounts: self.amounts,
            audit_trail: self.audit_trail,
        }
    }
}

/// One contractor's billing for one period.
///
/// # Example
///
/// ```
/// use contractor_billing::config::EngineConfig;
/// use contractor_billing::models::{BillingDraft, ContractTerms, ContractType, Period};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let terms = ContractTerms::new(
///     ContractType::Mandate,
///     Decimal::from_str("59.53").unwrap(),
///     168,
///     Decimal::from_str("1.5").unwrap(),
///     false,
///     Decimal::from_str("80.00").unwrap(),
/// ).unwrap();
/// let period = Period::new(2023, 3).unwrap();
/// let config = EngineConfig::default();
///
/// let mut record = BillingDraft::compute(1, period, Decimal::from(160), terms, &config)
///     .unwrap()
///     .into_record(1);
/// assert_eq!(record.contractor_remuneration(), Decimal::from_str("9524.80").unwrap());
/// assert_eq!(record.client_charge(), Decimal::from_str("12800.00").unwrap());
/// assert_eq!(record.profit(), Decimal::from_str("3275.20").unwrap());
///
/// record.update_worked_hours(Decimal::from(100), &config).unwrap();
/// assert_eq!(record.profit(), record.client_charge() - record.contractor_remuneration());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingRecord {
    id: u32,
    contractor_id: u32,
    period: Period,
    worked_hours: Decimal,
    terms: ContractTerms,
    #[serde(flatten)]
    amounts: BillingAmounts,
    audit_trail: Vec<AuditStep>,
}

impl BillingRecord {
    /// Store-assigned identifier.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The contractor being billed.
    pub fn contractor_id(&self) -> u32 {
        self.contractor_id
    }

    /// The billed period.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Hours worked in the period.
    pub fn worked_hours(&self) -> Decimal {
        self.worked_hours
    }

    /// The contract terms the amounts were computed from.
    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    /// The derived money fields.
    pub fn amounts(&self) -> &BillingAmounts {
        &self.amounts
    }

    /// Amount paid to the contractor.
    pub fn contractor_remuneration(&self) -> Decimal {
        self.amounts.contractor_remuneration
    }

    /// Amount charged to the client.
    pub fn client_charge(&self) -> Decimal {
        self.amounts.client_charge
    }

    /// Client charge minus remuneration.
    pub fn profit(&self) -> Decimal {
        self.amounts.profit
    }

    /// How the current amounts were computed.
    pub fn audit_trail(&self) -> &[AuditStep] {
        &self.audit_trail
    }

    /// Replaces the worked hours and recomputes every derived field.
    ///
    /// The record is left untouched if the recomputation fails.
    pub fn update_worked_hours(
        &mut self,
        worked_hours: Decimal,
        config: &EngineConfig,
    ) -> EngineResult<()> {
        let calculation = calculate_billing_amounts(worked_hours, &self.terms, config)?;
        self.worked_hours = worked_hours;
        self.amounts = calculation.amounts;
        self.audit_trail = calculation.audit_steps;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::ContractType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_employment_terms() -> ContractTerms {
        let mut terms = ContractTerms::new(
            ContractType::Employment,
            dec("59.53"),
            168,
            dec("1.5"),
            false,
            dec("85.00"),
        ).unwrap();
        terms.monthly_earnings = dec("10005.04");
        terms
    }

    fn create_record(worked_hours: &str) -> BillingRecord {
        BillingDraft::compute(
            3,
            Period::new(2023, 3).unwrap(),
            dec(worked_hours),
            create_employment_terms(),
            &EngineConfig::default(),
        )
        .unwrap()
        .into_record(11)
    }

    #[test]
    fn test_into_record_keeps_draft_fields() {
        let record = create_record("168");

        assert_eq!(record.id(), 11);
        assert_eq!(record.contractor_id(), 3);
        assert_eq!(record.period(), Period::new(2023, 3).unwrap());
        assert_eq!(record.worked_hours(), dec("168"));
        assert_eq!(record.contractor_remuneration(), dec("10005.04"));
        assert_eq!(record.client_charge(), dec("14280.00"));
        assert_eq!(record.profit(), dec("4274.96"));
    }

    #[test]
    fn test_update_worked_hours_recomputes_all_amounts() {
        let config = EngineConfig::default();
        let mut record = create_record("168");

        record.update_worked_hours(dec("176"), &config).unwrap();

        assert_eq!(record.worked_hours(), dec("176"));
        assert_eq!(record.contractor_remuneration(), dec("10719.40"));
        assert_eq!(record.client_charge(), dec("14960.00"));
        assert_eq!(record.profit(), dec("4240.60"));
    }

    #[test]
    fn test_update_worked_hours_with_negative_leaves_record_untouched() {
        let config = EngineConfig::default();
        let mut record = create_record("168");
        let before = record.clone();

        let result = record.update_worked_hours(dec("-1"), &config);

        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
        assert_eq!(record, before);
    }

    #[test]
    fn test_audit_trail_is_recorded() {
        let record = create_record("160");
        let rule_ids: Vec<&str> = record
            .audit_trail()
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec!["employment_partial_month", "client_charge", "profit"]
        );
    }

    #[test]
    fn test_serialized_record_flattens_amounts() {
        let record = create_record("168");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 11);
        assert_eq!(json["period"]["month"], 3);
        assert_eq!(json["contractor_remuneration"], "10005.04");
        assert_eq!(json["client_charge"], "14280.00");
        assert_eq!(json["profit"], "4274.96");
    }
}
