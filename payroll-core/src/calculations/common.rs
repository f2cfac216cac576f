//! Shared arithmetic helpers for payroll calculations.

use rust_decimal::Decimal;

/// Rounds a value to two decimal places using half-up rounding.
///
/// Standard financial convention: values at exactly 0.005 round away from
/// zero. Used only at presentation boundaries, never inside a derivation.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(11360.858)), dec!(11360.86));
/// assert_eq!(round_half_up(dec!(99.155)), dec!(99.16));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01)); // away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a plain percentage to an amount: `percent_of(x, 12)` is 12% of `x`.
///
/// Every percentage in a [`PayrollConfig`](crate::PayrollConfig) passes
/// through here, so the divide-by-100 happens in exactly one place.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(13000), dec!(12)), dec!(1560));
/// assert_eq!(percent_of(dec!(635.32), dec!(8.33)), dec!(52.922156));
/// ```
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}
