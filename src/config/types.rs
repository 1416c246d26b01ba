//! Configuration types for the billing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so a partial file only overrides what it names.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_WORKDAY_HOURS};

/// Rounding policy for money produced by the calculators.
///
/// Remuneration for mandate and B2B contracts and for employment overtime is
/// always rounded half-up to 2 decimal places. The two flags here cover the
/// figures that are not rounded by default or are rounded only by choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoundingConfig {
    /// Round `worked_hours × client_hour_price` to 2 decimal places.
    ///
    /// Disable to reproduce historical unrounded charges.
    pub round_client_charge: bool,
    /// Round the employment salary and partial-month amounts as well.
    pub round_exact_employment_branches: bool,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            round_client_charge: true,
            round_exact_employment_branches: false,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use contractor_billing::config::EngineConfig;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.workday_hours, Decimal::from(8));
/// assert_eq!(config.default_overtime_multiplier, Decimal::new(15, 1));
/// assert!(config.rounding.round_client_charge);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hours in a standard working day.
    pub workday_hours: Decimal,
    /// Overtime multiplier given to contractors created without one.
    pub default_overtime_multiplier: Decimal,
    /// Rounding policy.
    pub rounding: RoundingConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workday_hours: DEFAULT_WORKDAY_HOURS,
            default_overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            rounding: RoundingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}
