//! Core data models for the contractor billing engine.
//!
//! This module contains the domain models shared by the calculators, the
//! record store, the service layer and the HTTP API.

mod audit;
mod billing;
mod contract;
mod contractor;
mod period;
mod report;

pub use audit::AuditStep;
pub use billing::{BillingDraft, BillingRecord};
pub use contract::ContractType;
pub use contractor::{ContractTerms, Contractor, NewContractor};
pub use period::Period;
pub use report::MonthlyReport;
