//! Money rounding helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for money amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a money amount half-up to [`MONEY_SCALE`] fractional digits.
///
/// The result always carries exactly two fractional digits, so `9524.8`
/// becomes `9524.80`.
///
/// # Example
///
/// ```
/// use contractor_billing::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()).to_string(), "10.01");
/// assert_eq!(round_money(Decimal::from_str("10.004").unwrap()).to_string(), "10.00");
/// assert_eq!(round_money(Decimal::from(7)).to_string(), "7.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}
