use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::BusinessType;

const FULL_PERCENTAGE: Decimal = dec!(100);

/// A single deduction rule from the reference catalogue.
///
/// `percentage` is the deductible share of the cost. `None` means the cost
/// is fully (100%) deductible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionRule {
    pub id: i64,
    pub category: String,
    pub item: String,
    pub description: String,
    pub conditions: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub percentage: Option<Decimal>,
    pub business_type: BusinessType,
    pub sector: Option<String>,
}

/// For inserting new rules (no id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeductionRule {
    pub category: String,
    pub item: String,
    pub description: String,
    pub conditions: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub percentage: Option<Decimal>,
    pub business_type: BusinessType,
    pub sector: Option<String>,
}

/// Returns true when `percentage` is absent or within `[0, 100]`.
pub fn is_valid_percentage(percentage: Option<Decimal>) -> bool {
    percentage.is_none_or(|p| p >= Decimal::ZERO && p <= FULL_PERCENTAGE)
}
