//! BTW (Dutch VAT) amount calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BtwError {
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("unsupported BTW rate '{0}'; expected 21, 9 or 0")]
    UnsupportedRate(String),

    #[error("amount {0} is too large to calculate BTW for")]
    AmountTooLarge(Decimal),
}

/// The BTW tariffs that apply in the Netherlands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BtwRate {
    /// 21%, the general tariff.
    Standard,
    /// 9%, e.g. food, books, repairs.
    Reduced,
    /// 0%, exports and intra-EU supplies.
    Zero,
}

impl BtwRate {
    /// The rate as a fraction (`0.21` for 21%).
    pub fn fraction(&self) -> Decimal {
        match self {
            Self::Standard => dec!(0.21),
            Self::Reduced => dec!(0.09),
            Self::Zero => Decimal::ZERO,
        }
    }

    pub fn percentage(&self) -> u8 {
        match self {
            Self::Standard => 21,
            Self::Reduced => 9,
            Self::Zero => 0,
        }
    }

    /// Parses a percentage such as `"21"`, `"9%"` or a rate name.
    pub fn parse(s: &str) -> Result<Self, BtwError> {
        match s.trim().trim_end_matches('%').trim() {
            "21" | "standard" | "hoog" => Ok(Self::Standard),
            "9" | "reduced" | "laag" => Ok(Self::Reduced),
            "0" | "zero" | "nul" => Ok(Self::Zero),
            _ => Err(BtwError::UnsupportedRate(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtwCalculation {
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub btw: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    pub rate: BtwRate,
}

/// Splits `amount` into net, BTW and gross parts.
///
/// With `includes_btw` the amount is treated as gross and the BTW is taken
/// out; otherwise it is treated as net and the BTW is added on top.
///
/// ```
/// use rust_decimal_macros::dec;
/// use belasting_core::calculations::{BtwRate, calculate_btw};
///
/// let added = calculate_btw(dec!(100), BtwRate::Standard, false).unwrap();
/// assert_eq!(added.gross, dec!(121.00));
///
/// let removed = calculate_btw(dec!(121), BtwRate::Standard, true).unwrap();
/// assert_eq!(removed.net, dec!(100.00));
/// ```
pub fn calculate_btw(
    amount: Decimal,
    rate: BtwRate,
    includes_btw: bool,
) -> Result<BtwCalculation, BtwError> {
    if amount < Decimal::ZERO {
        return Err(BtwError::NegativeAmount(amount));
    }

    let (net, btw, gross) = if includes_btw {
        let net = round_half_up(amount / (Decimal::ONE + rate.fraction()));
        let gross = round_half_up(amount);
        (net, gross - net, gross)
    } else {
        let net = round_half_up(amount);
        let btw = round_half_up(amount * rate.fraction());
        let gross = net
            .checked_add(btw)
            .ok_or(BtwError::AmountTooLarge(amount))?;
        (net, btw, gross)
    };

    Ok(BtwCalculation {
        net,
        btw,
        gross,
        rate,
    })
}
