//! Billing service.
//!
//! Orchestrates the record store and the calculators: contractor
//! registration and terms maintenance, billing record creation and
//! correction, and monthly reporting. Validation rules that sit outside the
//! pure calculators (duplicate periods, unchanged values) live here.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::build_monthly_report;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BillingDraft, BillingRecord, ContractTerms, ContractType, Contractor, MonthlyReport,
    NewContractor, Period,
};
use crate::store::RecordStore;

/// Data needed to register a contractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractorRegistration {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contract type.
    pub contract_type: ContractType,
    /// Pay per hour worked.
    pub hourly_rate: Decimal,
    /// Full-time hours per month.
    pub monthly_hour_limit: u32,
    /// Overtime multiplier; the configured default is used when absent.
    pub overtime_multiplier: Option<Decimal>,
    /// Whether B2B overtime is paid at a premium.
    pub overtime_paid: bool,
    /// Price per hour charged to the client.
    pub client_hour_price: Decimal,
}

/// A partial change to a contractor's terms. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermsUpdate {
    /// New hourly rate (recomputes the monthly earnings baseline).
    pub hourly_rate: Option<Decimal>,
    /// New monthly hour limit (recomputes the monthly earnings baseline).
    pub monthly_hour_limit: Option<u32>,
    /// New overtime multiplier.
    pub overtime_multiplier: Option<Decimal>,
    /// New client hour price.
    pub client_hour_price: Option<Decimal>,
    /// New overtime-paid flag.
    pub overtime_paid: Option<bool>,
    /// New contract type.
    pub contract_type: Option<ContractType>,
}

impl TermsUpdate {
    fn is_empty(&self) -> bool {
        self == &TermsUpdate::default()
    }
}

/// Contractor billing operations over a [`RecordStore`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use contractor_billing::config::EngineConfig;
/// use contractor_billing::models::{ContractType, Period};
/// use contractor_billing::service::{BillingService, ContractorRegistration};
/// use contractor_billing::store::InMemoryStore;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let service = BillingService::new(Arc::new(InMemoryStore::new()), EngineConfig::default());
/// let contractor = service
///     .add_contractor(ContractorRegistration {
///         first_name: "Anna".to_string(),
///         last_name: "Nowak".to_string(),
///         contract_type: ContractType::Mandate,
///         hourly_rate: Decimal::from_str("59.53").unwrap(),
///         monthly_hour_limit: 168,
///         overtime_multiplier: None,
///         overtime_paid: false,
///         client_hour_price: Decimal::from_str("85.00").unwrap(),
///     })
///     .unwrap();
///
/// let period = Period::new(2023, 3).unwrap();
/// service.create_billing(contractor.id, period, Decimal::from(160)).unwrap();
///
/// let report = service.monthly_report(period).unwrap();
/// assert_eq!(report.total_expense, Decimal::from_str("9524.80").unwrap());
/// assert_eq!(report.working_hours, Decimal::from(184));
/// ```
#[derive(Clone)]
pub struct BillingService {
    store: Arc<dyn RecordStore>,
    config: EngineConfig,
}

impl BillingService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn RecordStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Contractors
    // =========================================================================

    /// Registers a contractor, deriving the monthly earnings baseline.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank name or a negative rate, multiplier or price
    /// - `ContractorConflict` if the name is already registered
    pub fn add_contractor(&self, registration: ContractorRegistration) -> EngineResult<Contractor> {
        let first_name = registration.first_name.trim().to_string();
        let last_name = registration.last_name.trim().to_string();
        require_name("first_name", &first_name)?;
        require_name("last_name", &last_name)?;

        let overtime_multiplier = registration
            .overtime_multiplier
            .unwrap_or(self.config.default_overtime_multiplier);
        require_non_negative("hourly_rate", registration.hourly_rate)?;
        require_non_negative("overtime_multiplier", overtime_multiplier)?;
        require_non_negative("client_hour_price", registration.client_hour_price)?;

        let terms = ContractTerms::new(
            registration.contract_type,
            registration.hourly_rate,
            registration.monthly_hour_limit,
            overtime_multiplier,
            registration.overtime_paid,
            registration.client_hour_price,
        )?;

        let contractor = self
            .store
            .insert_contractor(NewContractor {
                first_name,
                last_name,
                terms,
            })
            .inspect_err(|err| warn!(error = %err, "Contractor registration rejected"))?;

        info!(
            contractor_id = contractor.id,
            contract_type = %contractor.terms.contract_type,
            monthly_earnings = %contractor.terms.monthly_earnings,
            "Contractor registered"
        );
        Ok(contractor)
    }

    /// Looks up a contractor.
    pub fn contractor(&self, id: u32) -> EngineResult<Contractor> {
        self.store
            .contractor(id)?
            .ok_or(EngineError::ContractorNotFound { id })
    }

    /// Lists every contractor.
    pub fn contractors(&self) -> EngineResult<Vec<Contractor>> {
        self.store.contractors()
    }

    /// Deletes a contractor together with their billing records.
    pub fn delete_contractor(&self, id: u32) -> EngineResult<()> {
        self.store.delete_contractor(id)?;
        info!(contractor_id = id, "Contractor deleted");
        Ok(())
    }

    /// Applies a partial terms change.
    ///
    /// Every requested field must be valid and differ from the current
    /// value; otherwise nothing is changed. Existing billing records keep
    /// the terms they were computed with.
    ///
    /// # Errors
    ///
    /// - `ContractorNotFound` if the contractor does not exist
    /// - `InvalidInput` if the update is empty or a value is negative
    /// - `ValueUnchanged` if a value equals the current one
    pub fn update_terms(&self, id: u32, update: &TermsUpdate) -> EngineResult<Contractor> {
        if update.is_empty() {
            return Err(EngineError::InvalidInput {
                field: "terms".to_string(),
                message: "no changes requested".to_string(),
            });
        }

        let mut contractor = self.contractor(id)?;
        let terms = &mut contractor.terms;

        if let Some(hourly_rate) = update.hourly_rate {
            require_non_negative("hourly_rate", hourly_rate)?;
            require_changed("hourly_rate", terms.hourly_rate == hourly_rate)?;
            terms.set_hourly_rate(hourly_rate)?;
        }
        if let Some(limit) = update.monthly_hour_limit {
            require_changed("monthly_hour_limit", terms.monthly_hour_limit == limit)?;
            terms.set_monthly_hour_limit(limit)?;
        }
        if let Some(multiplier) = update.overtime_multiplier {
            require_non_negative("overtime_multiplier", multiplier)?;
            require_changed("overtime_multiplier", terms.overtime_multiplier == multiplier)?;
            terms.overtime_multiplier = multiplier;
        }
        if let Some(price) = update.client_hour_price {
            require_non_negative("client_hour_price", price)?;
            require_changed("client_hour_price", terms.client_hour_price == price)?;
            terms.client_hour_price = price;
        }
        if let Some(overtime_paid) = update.overtime_paid {
            require_changed("overtime_paid", terms.overtime_paid == overtime_paid)?;
            terms.overtime_paid = overtime_paid;
        }
        if let Some(contract_type) = update.contract_type {
            require_changed("contract_type", terms.contract_type == contract_type)?;
            terms.contract_type = contract_type;
        }

        self.store.update_contractor(&contractor)?;
        info!(
            contractor_id = id,
            contract_type = %contractor.terms.contract_type,
            hourly_rate = %contractor.terms.hourly_rate,
            monthly_earnings = %contractor.terms.monthly_earnings,
            "Contract terms updated"
        );
        Ok(contractor)
    }

    /// Changes the hourly rate and the monthly earnings baseline.
    pub fn update_hourly_rate(&self, id: u32, hourly_rate: Decimal) -> EngineResult<Contractor> {
        self.update_terms(
            id,
            &TermsUpdate {
                hourly_rate: Some(hourly_rate),
                ..TermsUpdate::default()
            },
        )
    }

    /// Changes the monthly hour limit and the monthly earnings baseline.
    pub fn update_monthly_hour_limit(&self, id: u32, limit: u32) -> EngineResult<Contractor> {
        self.update_terms(
            id,
            &TermsUpdate {
                monthly_hour_limit: Some(limit),
                ..TermsUpdate::default()
            },
        )
    }

    /// Changes the overtime multiplier.
    pub fn update_overtime_multiplier(
        &self,
        id: u32,
        multiplier: Decimal,
    ) -> EngineResult<Contractor> {
        self.update_terms(
            id,
            &TermsUpdate {
                overtime_multiplier: Some(multiplier),
                ..TermsUpdate::default()
            },
        )
    }

    /// Changes the price per hour charged to the client.
    pub fn update_client_hour_price(&self, id: u32, price: Decimal) -> EngineResult<Contractor> {
        self.update_terms(
            id,
            &TermsUpdate {
                client_hour_price: Some(price),
                ..TermsUpdate::default()
            },
        )
    }

    /// Turns the B2B overtime premium on or off.
    pub fn update_overtime_paid(&self, id: u32, overtime_paid: bool) -> EngineResult<Contractor> {
        self.update_terms(
            id,
            &TermsUpdate {
                overtime_paid: Some(overtime_paid),
                ..TermsUpdate::default()
            },
        )
    }

    /// Changes the contract type.
    pub fn update_contract_type(
        &self,
        id: u32,
        contract_type: ContractType,
    ) -> EngineResult<Contractor> {
        self.update_terms(
            id,
            &TermsUpdate {
                contract_type: Some(contract_type),
                ..TermsUpdate::default()
            },
        )
    }

    // =========================================================================
    // Billing records
    // =========================================================================

    /// Bills a contractor's hours for a period.
    ///
    /// The contractor's current terms are captured on the record.
    ///
    /// # Errors
    ///
    /// - `ContractorNotFound` if the contractor does not exist
    /// - `InvalidInput` if `worked_hours` is negative
    /// - `BillingConflict` if the period is already billed for the contractor
    pub fn create_billing(
        &self,
        contractor_id: u32,
        period: Period,
        worked_hours: Decimal,
    ) -> EngineResult<BillingRecord> {
        let contractor = self.contractor(contractor_id)?;
        require_non_negative("worked_hours", worked_hours)?;

        if self.store.billing_exists(contractor_id, period)? {
            warn!(contractor_id, period = %period, "Period already billed");
            return Err(EngineError::BillingConflict {
                contractor_id,
                period,
            });
        }

        let draft = BillingDraft::compute(
            contractor_id,
            period,
            worked_hours,
            contractor.terms,
            &self.config,
        )?;
        debug!(
            contractor_id,
            period = %period,
            branch = ?draft.amounts().remuneration_branch,
            "Billing computed"
        );

        let record = self.store.insert_billing(draft)?;
        info!(
            billing_id = record.id(),
            contractor_id,
            period = %period,
            worked_hours = %worked_hours,
            remuneration = %record.contractor_remuneration(),
            client_charge = %record.client_charge(),
            profit = %record.profit(),
            "Billing record created"
        );
        Ok(record)
    }

    /// Looks up a billing record.
    pub fn billing(&self, id: u32) -> EngineResult<BillingRecord> {
        self.store
            .billing(id)?
            .ok_or(EngineError::BillingNotFound { id })
    }

    /// Lists every billing record.
    pub fn billings(&self) -> EngineResult<Vec<BillingRecord>> {
        self.store.billings()
    }

    /// Deletes a billing record.
    pub fn delete_billing(&self, id: u32) -> EngineResult<()> {
        self.store.delete_billing(id)?;
        info!(billing_id = id, "Billing record deleted");
        Ok(())
    }

    /// Corrects the worked hours of a billing record.
    ///
    /// Remuneration, client charge and profit are recomputed from the terms
    /// stored on the record.
    ///
    /// # Errors
    ///
    /// - `BillingNotFound` if the record does not exist
    /// - `InvalidInput` if `worked_hours` is negative
    /// - `ValueUnchanged` if `worked_hours` equals the current hours
    pub fn update_worked_hours(&self, id: u32, worked_hours: Decimal) -> EngineResult<BillingRecord> {
        let mut record = self.billing(id)?;
        require_non_negative("worked_hours", worked_hours)?;
        require_changed("worked_hours", record.worked_hours() == worked_hours)?;

        record.update_worked_hours(worked_hours, &self.config)?;
        self.store.update_billing(&record)?;

        info!(
            billing_id = id,
            worked_hours = %worked_hours,
            remuneration = %record.contractor_remuneration(),
            client_charge = %record.client_charge(),
            profit = %record.profit(),
            "Billing record recomputed"
        );
        Ok(record)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Builds the monthly report for a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the period has no billing records.
    pub fn monthly_report(&self, period: Period) -> EngineResult<MonthlyReport> {
        let records = self.store.billings_for_period(period)?;
        let report = build_monthly_report(period, &records, self.config.workday_hours)
            .inspect_err(|_| warn!(period = %period, "No billing records for period"))?;

        info!(
            period = %period,
            records = report.records.len(),
            total_expense = %report.total_expense,
            total_income = %report.total_income,
            total_profit = %report.total_profit,
            "Monthly report built"
        );
        Ok(report)
    }
}

fn require_name(field: &str, value: &str) -> EngineResult<()> {
    if value.is_empty() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::negative(field, value));
    }
    Ok(())
}

fn require_changed(field: &str, unchanged: bool) -> EngineResult<()> {
    if unchanged {
        return Err(EngineError::ValueUnchanged {
            field: field.to_string(),
        });
    }
    Ok(())
}
