//! Savings estimate for the interactive demo.
//!
//! A flat approximation of Dutch income tax for a sole proprietor. It is
//! meant to show the order of magnitude of possible savings, not to produce a
//! filing-grade figure.
//!
//! # Worksheet Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Mileage deduction: kilometres × €0.23 |
//! | 2    | Taxable income: income − expenses − step 1, minimum 0 |
//! | 3    | Tax rate: 36.93% up to €37,149 of income, 37.93% above |
//! | 4    | Estimated tax: step 2 × step 3 |
//! | 5    | Social contributions: min(step 2, €73,031) × 31% |
//! | 6    | Current tax: step 4 + step 5 |
//! | 7    | Net income: income − step 6 |
//! | 8    | Additional deductions: income × 8% |
//! | 9    | Potential savings: step 8 × step 3 + income × 2% + step 1 × 10% |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use belasting_core::calculations::{SavingsInput, SavingsWorksheet};
//!
//! let worksheet = SavingsWorksheet::default();
//! let result = worksheet.calculate(&SavingsInput {
//!     income: dec!(60000),
//!     expenses: dec!(15000),
//!     mileage_km: dec!(8000),
//! });
//!
//! assert_eq!(result.mileage_deduction, dec!(1840));
//! assert_eq!(result.net_income, dec!(30250));
//! assert_eq!(result.potential_savings, dec!(3205));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{max, min, round_euro, round_half_up};

/// Constants driving the savings estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsConfig {
    /// Deduction per business kilometre.
    pub mileage_rate: Decimal,

    /// Income up to and including this amount uses `lower_tax_rate`.
    pub lower_bracket_limit: Decimal,
    pub lower_tax_rate: Decimal,
    pub upper_tax_rate: Decimal,

    /// Taxable income above this amount carries no social contributions.
    pub social_contribution_cap: Decimal,
    pub social_contribution_rate: Decimal,

    /// Share of income assumed to be claimable as yet-unused deductions.
    pub additional_deduction_rate: Decimal,
    /// Share of income assumed to be recoverable by optimising BTW.
    pub btw_optimization_rate: Decimal,
    /// Share of the mileage deduction counted as extra savings.
    pub mileage_savings_factor: Decimal,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            mileage_rate: dec!(0.23),
            lower_bracket_limit: dec!(37149),
            lower_tax_rate: dec!(0.3693),
            upper_tax_rate: dec!(0.3793),
            social_contribution_cap: dec!(73031),
            social_contribution_rate: dec!(0.31),
            additional_deduction_rate: dec!(0.08),
            btw_optimization_rate: dec!(0.02),
            mileage_savings_factor: dec!(0.1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsInput {
    pub income: Decimal,
    pub expenses: Decimal,
    pub mileage_km: Decimal,
}

/// Result of the savings estimate.
///
/// The headline figures are rounded to whole euros. The breakdown fields
/// keep cent precision so callers can show how the figures were reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEstimate {
    #[serde(with = "rust_decimal::serde::float")]
    pub net_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub mileage_deduction: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub potential_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub additional_deductions: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub social_contributions: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct SavingsWorksheet {
    config: SavingsConfig,
}

impl SavingsWorksheet {
    pub fn new(config: SavingsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SavingsConfig {
        &self.config
    }

    /// Runs the estimate. Negative inputs are accepted; only the taxable
    /// income is floored at zero. Sums saturate at the `Decimal` bounds, so
    /// extreme inputs yield a clamped estimate instead of a panic.
    pub fn calculate(
        &self,
        input: &SavingsInput,
    ) -> SavingsEstimate {
        let mileage_deduction = input.mileage_km * self.config.mileage_rate;
        let taxable_income = max(
            input
                .income
                .saturating_sub(input.expenses)
                .saturating_sub(mileage_deduction),
            Decimal::ZERO,
        );
        let tax_rate = self.tax_rate(input.income);

        let estimated_tax = taxable_income * tax_rate;
        let social_contributions = min(taxable_income, self.config.social_contribution_cap)
            * self.config.social_contribution_rate;
        let total_tax = estimated_tax.saturating_add(social_contributions);
        let net_income = input.income.saturating_sub(total_tax);

        let additional_deductions = input.income * self.config.additional_deduction_rate;
        let tax_savings = additional_deductions * tax_rate;
        let btw_optimization = input.income * self.config.btw_optimization_rate;
        let potential_savings = tax_savings
            .saturating_add(btw_optimization)
            .saturating_add(mileage_deduction * self.config.mileage_savings_factor);

        debug!(
            %taxable_income,
            %tax_rate,
            %total_tax,
            "savings estimate calculated"
        );

        SavingsEstimate {
            net_income: round_euro(net_income),
            current_tax: round_euro(total_tax),
            mileage_deduction: round_euro(mileage_deduction),
            potential_savings: round_euro(potential_savings),
            additional_deductions: round_euro(additional_deductions),
            taxable_income: round_half_up(taxable_income),
            tax_rate,
            estimated_tax: round_half_up(estimated_tax),
            social_contributions: round_half_up(social_contributions),
        }
    }

    /// The bracket boundary is inclusive on the lower side.
    fn tax_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= self.config.lower_bracket_limit {
            self.config.lower_tax_rate
        } else {
            self.config.upper_tax_rate
        }
    }
}

/// Runs the estimate with the default constants.
pub fn calculate_savings(
    income: Decimal,
    expenses: Decimal,
    mileage_km: Decimal,
) -> SavingsEstimate {
    SavingsWorksheet::default().calculate(&SavingsInput {
        income,
        expenses,
        mileage_km,
    })
}
