//! Contractor model and the contract terms consumed by the calculators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::ContractType;

/// The pay terms of a contractor at a point in time.
///
/// `monthly_earnings` is the reference full-month salary
/// (`hourly_rate × monthly_hour_limit`). It is derived when the terms are
/// built and whenever the rate or limit is changed through the setters; the
/// calculators take it as given. Building or updating terms whose baseline
/// does not fit in a [`Decimal`] fails with `InvalidInput`.
///
/// # Example
///
/// ```
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
/// assert_eq!(terms.monthly_earnings, Decimal::from_str("10001.04").unwrap());
///
/// terms.set_monthly_hour_limit(160).unwrap();
/// assert_eq!(terms.monthly_earnings, Decimal::from_str("9524.80").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    /// The contract type, which selects the remuneration rule.
    pub contract_type: ContractType,
    /// Pay per hour worked.
    pub hourly_rate: Decimal,
    /// Full-time hours per month before overtime rules apply.
    pub monthly_hour_limit: u32,
    /// Factor applied to the hourly rate for hours beyond the limit.
    pub overtime_multiplier: Decimal,
    /// Whether overtime is paid at a premium (only consulted for B2B).
    pub overtime_paid: bool,
    /// Reference full-month salary, `hourly_rate × monthly_hour_limit`.
    pub monthly_earnings: Decimal,
    /// Price per hour charged to the client.
    pub client_hour_price: Decimal,
}

impl ContractTerms {
    /// Builds contract terms, deriving the monthly earnings baseline.
    pub fn new(
        contract_type: ContractType,
        hourly_rate: Decimal,
        monthly_hour_limit: u32,
        overtime_multiplier: Decimal,
        overtime_paid: bool,
        client_hour_price: Decimal,
    ) -> EngineResult<Self> {
        Ok(Self {
            contract_type,
            hourly_rate,
            monthly_hour_limit,
            overtime_multiplier,
            overtime_paid,
            monthly_earnings: monthly_earnings(hourly_rate, monthly_hour_limit)?,
            client_hour_price,
        })
    }

    /// Changes the hourly rate and recomputes the monthly earnings baseline.
    ///
    /// The terms are left untouched on error.
    pub fn set_hourly_rate(&mut self, hourly_rate: Decimal) -> EngineResult<()> {
        self.monthly_earnings = monthly_earnings(hourly_rate, self.monthly_hour_limit)?;
        self.hourly_rate = hourly_rate;
        Ok(())
    }

    /// Changes the monthly hour limit and recomputes the monthly earnings baseline.
    ///
    /// The terms are left untouched on error.
    pub fn set_monthly_hour_limit(&mut self, monthly_hour_limit: u32) -> EngineResult<()> {
        self.monthly_earnings = monthly_earnings(self.hourly_rate, monthly_hour_limit)?;
        self.monthly_hour_limit = monthly_hour_limit;
        Ok(())
    }
}

fn monthly_earnings(hourly_rate: Decimal, monthly_hour_limit: u32) -> EngineResult<Decimal> {
    hourly_rate
        .checked_mul(Decimal::from(monthly_hour_limit))
        .ok_or_else(|| EngineError::overflow("monthly_earnings"))
}

/// A contractor known to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    /// Store-assigned identifier.
    pub id: u32,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// The contractor's current pay terms.
    pub terms: ContractTerms,
}

impl Contractor {
    /// Returns "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A contractor that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContractor {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Initial pay terms.
    pub terms: ContractTerms,
}

impl NewContractor {
    /// Attaches a store-assigned identifier.
    pub fn into_contractor(self, id: u32) -> Contractor {
        Contractor {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            terms: self.terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_terms() -> ContractTerms {
        ContractTerms::new(
            ContractType::B2b,
            dec("59.53"),
            168,
            dec("1.5"),
            true,
            dec("90.00"),
        ).unwrap()
    }

    #[test]
    fn test_new_derives_monthly_earnings() {
        let terms = create_test_terms();
        assert_eq!(terms.monthly_earnings, dec("10001.04"));
    }

    #[test]
    fn test_set_hourly_rate_recomputes_baseline() {
        let mut terms = create_test_terms();
        terms.set_hourly_rate(dec("60.00")).unwrap();

        assert_eq!(terms.hourly_rate, dec("60.00"));
        assert_eq!(terms.monthly_earnings, dec("10080.00"));
    }

    #[test]
    fn test_zero_hour_limit_gives_zero_baseline() {
        let mut terms = create_test_terms();
        terms.set_monthly_hour_limit(0).unwrap();
        assert_eq!(terms.monthly_earnings, Decimal::ZERO);
    }

    #[test]
    fn test_baseline_out_of_range_is_invalid_input() {
        let result = ContractTerms::new(
            ContractType::Employment,
            Decimal::MAX,
            168,
            dec("1.5"),
            false,
            dec("90.00"),
        );

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "monthly_earnings"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_rate_change_leaves_terms_untouched() {
        let mut terms = create_test_terms();
        let before = terms.clone();

        assert!(terms.set_hourly_rate(Decimal::MAX).is_err());
        assert_eq!(terms, before);
    }

    #[test]
    fn test_deserialize_terms_from_strings() {
        let json = r#"{
            "contract_type": "mandate",
            "hourly_rate": "42.10",
            "monthly_hour_limit": 120,
            "overtime_multiplier": "1.5",
            "overtime_paid": false,
            "monthly_earnings": "5052.00",
            "client_hour_price": "70"
        }"#;

        let terms: ContractTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.contract_type, ContractType::Mandate);
        assert_eq!(terms.hourly_rate, dec("42.10"));
        assert_eq!(terms.monthly_earnings, dec("5052.00"));
    }

    #[test]
    fn test_new_contractor_into_contractor_keeps_fields() {
        let new_contractor = NewContractor {
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            terms: create_test_terms(),
        };

        let contractor = new_contractor.clone().into_contractor(7);
        assert_eq!(contractor.id, 7);
        assert_eq!(contractor.full_name(), "Anna Nowak");
        assert_eq!(contractor.terms, new_contractor.terms);
    }
}
