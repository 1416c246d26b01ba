//! Client charge calculation.

use rust_decimal::Decimal;

use crate::config::RoundingConfig;
use crate::error::{EngineError, EngineResult};

use super::round_money;

/// Calculates what the client is billed for a contractor's hours.
///
/// The charge is `worked_hours × client_hour_price`, rounded half-up to 2
/// decimal places unless `rounding.round_client_charge` is disabled.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if either argument is negative or
/// the charge does not fit in a [`Decimal`].
///
/// # Example
///
/// ```
/// use contractor_billing::calculation::calculate_client_charge;
/// use contractor_billing::config::RoundingConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let charge = calculate_client_charge(
///     Decimal::from_str("10.5").unwrap(),
///     Decimal::from_str("33.33").unwrap(),
///     &RoundingConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(charge.to_string(), "349.97"); // 349.965 rounded half-up
/// ```
pub fn calculate_client_charge(
    worked_hours: Decimal,
    client_hour_price: Decimal,
    rounding: &RoundingConfig,
) -> EngineResult<Decimal> {
    if worked_hours < Decimal::ZERO {
        return Err(EngineError::negative("worked_hours", worked_hours));
    }
    if client_hour_price < Decimal::ZERO {
        return Err(EngineError::negative("client_hour_price", client_hour_price));
    }

    let charge = worked_hours
        .checked_mul(client_hour_price)
        .ok_or_else(|| EngineError::overflow("worked_hours"))?;
    if rounding.round_client_charge {
        Ok(round_money(charge))
    } else {
        Ok(charge)
    }
}
