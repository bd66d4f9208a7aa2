use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DeductionRule, NewDeductionRule, TaxDeadline};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for the rule catalogue and the filing deadlines.
///
/// Rules are reference data: they are loaded by seeds or the data loader and
/// only read by the API. The completion flag of a deadline is the one value
/// users change.
#[async_trait]
pub trait AdviceRepository: Send + Sync {
    // Deduction rules
    /// All rules in insertion order.
    async fn list_deduction_rules(&self) -> Result<Vec<DeductionRule>, RepositoryError>;

    async fn get_deduction_rule(
        &self,
        id: i64,
    ) -> Result<DeductionRule, RepositoryError>;

    async fn insert_deduction_rule(
        &self,
        rule: &NewDeductionRule,
    ) -> Result<DeductionRule, RepositoryError>;

    /// Removes every rule in `category`, returning how many were deleted.
    async fn delete_deduction_rules_in_category(
        &self,
        category: &str,
    ) -> Result<u64, RepositoryError>;

    /// Replaces every rule in `category` with `rules` as one unit. On error
    /// the category is left as it was. Returns how many rules were deleted.
    async fn replace_deduction_rules_in_category(
        &self,
        category: &str,
        rules: &[NewDeductionRule],
    ) -> Result<u64, RepositoryError>;

    // Tax deadlines
    /// All deadlines ordered by due date.
    async fn list_tax_deadlines(&self) -> Result<Vec<TaxDeadline>, RepositoryError>;

    async fn get_tax_deadline(
        &self,
        id: i64,
    ) -> Result<TaxDeadline, RepositoryError>;

    async fn set_deadline_completed(
        &self,
        id: i64,
        is_completed: bool,
    ) -> Result<TaxDeadline, RepositoryError>;
}
