//! Profit calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Client charge minus contractor remuneration.
///
/// Both inputs are already at their final precision, so no rounding is
/// applied. A negative result is a loss.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the difference does not fit in a
/// [`Decimal`].
///
/// # Example
///
/// ```
/// use contractor_billing::calculation::calculate_profit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profit = calculate_profit(
///     Decimal::from_str("2000.00").unwrap(),
///     Decimal::from_str("1391.30").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(profit, Decimal::from_str("608.70").unwrap());
/// ```
pub fn calculate_profit(client_charge: Decimal, contractor_remuneration: Decimal) -> EngineResult<Decimal> {
    client_charge
        .checked_sub(contractor_remuneration)
        .ok_or_else(|| EngineError::overflow("profit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_profit_is_charge_minus_remuneration() {
        assert_eq!(calculate_profit(dec("1800.00"), dec("1200.00")).unwrap(), dec("600.00"));
    }

    #[test]
    fn test_loss_is_negative() {
        assert_eq!(calculate_profit(dec("900.00"), dec("980.00")).unwrap(), dec("-80.00"));
    }

    #[test]
    fn test_unrounded_inputs_are_kept() {
        assert_eq!(calculate_profit(dec("349.965"), dec("100.001")).unwrap(), dec("249.964"));
    }

    #[test]
    fn test_difference_out_of_range_is_rejected() {
        let result = calculate_profit(Decimal::MAX, dec("-1"));
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }
}
