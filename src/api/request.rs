//! Request types for the contractor billing API.
//!
//! Contract types arrive as the legacy numeric tags (1 = employment,
//! 2 = mandate, 3 = B2B); money and hours arrive as decimal strings or
//! numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ContractType, Period};
use crate::service::{ContractorRegistration, TermsUpdate};

/// Request body for `POST /contractors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContractorRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Numeric contract type tag.
    pub contract_type: i64,
    /// Pay per hour worked.
    pub hourly_rate: Decimal,
    /// Full-time hours per month.
    pub monthly_hour_limit: u32,
    /// Overtime multiplier; the configured default applies when omitted.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
    /// Whether B2B overtime is paid at a premium.
    #[serde(default)]
    pub overtime_paid: bool,
    /// Price per hour charged to the client.
    pub client_hour_price: Decimal,
}

impl TryFrom<NewContractorRequest> for ContractorRegistration {
    type Error = EngineError;

    fn try_from(req: NewContractorRequest) -> EngineResult<Self> {
        Ok(ContractorRegistration {
            first_name: req.first_name,
            last_name: req.last_name,
            contract_type: ContractType::from_tag(req.contract_type)?,
            hourly_rate: req.hourly_rate,
            monthly_hour_limit: req.monthly_hour_limit,
            overtime_multiplier: req.overtime_multiplier,
            overtime_paid: req.overtime_paid,
            client_hour_price: req.client_hour_price,
        })
    }
}

/// Request body for `PATCH /contractors/:id/terms`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTermsRequest {
    /// New hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// New monthly hour limit.
    #[serde(default)]
    pub monthly_hour_limit: Option<u32>,
    /// New overtime multiplier.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
    /// New client hour price.
    #[serde(default)]
    pub client_hour_price: Option<Decimal>,
    /// New overtime-paid flag.
    #[serde(default)]
    pub overtime_paid: Option<bool>,
    /// New numeric contract type tag.
    #[serde(default)]
    pub contract_type: Option<i64>,
}

impl TryFrom<UpdateTermsRequest> for TermsUpdate {
    type Error = EngineError;

    fn try_from(req: UpdateTermsRequest) -> EngineResult<Self> {
        Ok(TermsUpdate {
            hourly_rate: req.hourly_rate,
            monthly_hour_limit: req.monthly_hour_limit,
            overtime_multiplier: req.overtime_multiplier,
            client_hour_price: req.client_hour_price,
            overtime_paid: req.overtime_paid,
            contract_type: req.contract_type.map(ContractType::from_tag).transpose()?,
        })
    }
}

/// Request body for `POST /billings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBillingRequest {
    /// The contractor being billed.
    pub contractor_id: u32,
    /// Billing year.
    pub year: i32,
    /// Billing month (1 = January).
    pub month: u32,
    /// Hours worked in the period.
    pub worked_hours: Decimal,
}

impl NewBillingRequest {
    /// Returns the validated billing period.
    pub fn period(&self) -> EngineResult<Period> {
        Period::new(self.year, self.month)
    }
}

/// Request body for `PUT /billings/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkedHoursRequest {
    /// Corrected hours worked.
    pub worked_hours: Decimal,
}

/// Query string of `GET /billings/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Reported year.
    pub year: i32,
    /// Reported month (1 = January).
    pub month: u32,
}

impl ReportQuery {
    /// Returns the validated report period.
    pub fn period(&self) -> EngineResult<Period> {
        Period::new(self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_new_contractor_request() {
        let json = r#"{
            "first_name": "Anna",
            "last_name": "Nowak",
            "contract_type": 3,
            "hourly_rate": "59.53",
            "monthly_hour_limit": 168,
            "client_hour_price": "85.00"
        }"#;

        let request: NewContractorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.hourly_rate, Decimal::from_str("59.53").unwrap());
        assert!(!request.overtime_paid);
        assert_eq!(request.overtime_multiplier, None);

        let registration = ContractorRegistration::try_from(request).unwrap();
        assert_eq!(registration.contract_type, ContractType::B2b);
    }

    #[test]
    fn test_unknown_tag_is_rejected_on_conversion() {
        let json = r#"{
            "first_name": "Anna",
            "last_name": "Nowak",
            "contract_type": 4,
            "hourly_rate": "10",
            "monthly_hour_limit": 160,
            "client_hour_price": "20"
        }"#;

        let request: NewContractorRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            ContractorRegistration::try_from(request),
            Err(EngineError::UnknownContractType { tag: 4 })
        ));
    }

    #[test]
    fn test_terms_update_converts_tag() {
        let request: UpdateTermsRequest =
            serde_json::from_str(r#"{"contract_type": 1, "overtime_paid": true}"#).unwrap();

        let update = TermsUpdate::try_from(request).unwrap();
        assert_eq!(update.contract_type, Some(ContractType::Employment));
        assert_eq!(update.overtime_paid, Some(true));
        assert_eq!(update.hourly_rate, None);
    }

    #[test]
    fn test_billing_request_period_validation() {
        let request = NewBillingRequest {
            contractor_id: 1,
            year: 2023,
            month: 0,
            worked_hours: Decimal::from(160),
        };
        assert!(matches!(
            request.period(),
            Err(EngineError::InvalidPeriod { year: 2023, month: 0 })
        ));
    }
}
