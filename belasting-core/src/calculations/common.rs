//! Shared rounding and comparison helpers for the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use belasting_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to whole euros, halves toward positive infinity.
///
/// ```
/// use rust_decimal_macros::dec;
/// use belasting_core::calculations::common::round_euro;
///
/// assert_eq!(round_euro(dec!(30249.812)), dec!(30250));
/// assert_eq!(round_euro(dec!(1820.5)), dec!(1821));
/// assert_eq!(round_euro(dec!(-1820.5)), dec!(-1820));
/// ```
pub fn round_euro(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}

/// Returns the larger of two values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the smaller of two values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}
