//! Error types for the contractor billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the engine, the record store and the service
//! layer can surface.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Period;

/// The main error type for the contractor billing engine.
///
/// All fallible operations return this error type, so callers (the HTTP
/// layer in particular) can translate failures in one place.
///
/// # Example
///
/// ```
/// use contractor_billing::error::EngineError;
/// use contractor_billing::models::Period;
///
/// let error = EngineError::PeriodNotFound {
///     period: Period::new(2024, 12).unwrap(),
/// };
/// assert_eq!(error.to_string(), "No billing records found for period 2024-12");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A numeric input was outside its allowed range (e.g. negative hours).
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The name of the offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A contract type tag did not match any known contract type.
    #[error("Unknown contract type tag: {tag}")]
    UnknownContractType {
        /// The unrecognized tag.
        tag: i64,
    },

    /// A monthly report was requested for a period without billing records.
    #[error("No billing records found for period {period}")]
    PeriodNotFound {
        /// The requested period.
        period: Period,
    },

    /// A (year, month) pair does not name a calendar month.
    #[error("Invalid billing period: year {year}, month {month}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// No contractor exists with the given identifier.
    #[error("Contractor not found: {id}")]
    ContractorNotFound {
        /// The identifier that was looked up.
        id: u32,
    },

    /// No billing record exists with the given identifier.
    #[error("Billing record not found: {id}")]
    BillingNotFound {
        /// The identifier that was looked up.
        id: u32,
    },

    /// A contractor with the same name already exists.
    #[error("Contractor already exists: {first_name} {last_name}")]
    ContractorConflict {
        /// First name of the duplicate contractor.
        first_name: String,
        /// Last name of the duplicate contractor.
        last_name: String,
    },

    /// The contractor has already been billed for the period.
    #[error("Contractor {contractor_id} already has a billing record for period {period}")]
    BillingConflict {
        /// The contractor being billed.
        contractor_id: u32,
        /// The already-billed period.
        period: Period,
    },

    /// An update request carried the value the record already holds.
    #[error("Value for '{field}' is unchanged")]
    ValueUnchanged {
        /// The field that was not changed.
        field: String,
    },

    /// The record store could not serve the request.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidInput`] for a value that must not be negative.
    pub(crate) fn negative(field: &str, value: Decimal) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        }
    }

    /// Builds an [`EngineError::InvalidInput`] for a value whose arithmetic
    /// leaves the representable decimal range.
    pub(crate) fn overflow(field: &str) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: "value is too large to calculate with".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "worked_hours".to_string(),
            message: "must not be negative, got -1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input 'worked_hours': must not be negative, got -1"
        );
    }

    #[test]
    fn test_negative_helper_formats_value() {
        let error = EngineError::negative("hourly_rate", Decimal::new(-525, 2));
        assert_eq!(
            error.to_string(),
            "Invalid input 'hourly_rate': must not be negative, got -5.25"
        );
    }

    #[test]
    fn test_overflow_helper_names_field() {
        let error = EngineError::overflow("monthly_earnings");
        assert_eq!(
            error.to_string(),
            "Invalid input 'monthly_earnings': value is too large to calculate with"
        );
    }

    #[test]
    fn test_unknown_contract_type_displays_tag() {
        let error = EngineError::UnknownContractType { tag: 7 };
        assert_eq!(error.to_string(), "Unknown contract type tag: 7");
    }

    #[test]
    fn test_period_not_found_displays_period() {
        let error = EngineError::PeriodNotFound {
            period: Period::new(2023, 3).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No billing records found for period 2023-03"
        );
    }

    #[test]
    fn test_billing_conflict_displays_contractor_and_period() {
        let error = EngineError::BillingConflict {
            contractor_id: 4,
            period: Period::new(2024, 11).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Contractor 4 already has a billing record for period 2024-11"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::ContractorNotFound { id: 1 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::ContractorNotFound { id: 1 })
        ));
    }
}
