//! Read-only lookup over the deduction rule catalogue.

use tracing::debug;

use crate::models::{BusinessType, DeductionRule};

/// An in-memory snapshot of the deduction rules, in catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleStore {
    rules: Vec<DeductionRule>,
}

impl RuleStore {
    pub fn new(rules: Vec<DeductionRule>) -> Self {
        Self { rules }
    }

    pub fn all(&self) -> &[DeductionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that apply to `business_type`, in catalogue order.
    ///
    /// A rule applies when its own business type equals the caller's or is
    /// `both`. An unknown business type yields no rules. `sector` is
    /// accepted for context only and never excludes a rule.
    pub fn deduction_rules(
        &self,
        business_type: &str,
        sector: Option<&str>,
    ) -> Vec<DeductionRule> {
        get_deduction_rules(&self.rules, business_type, sector)
    }
}

impl From<Vec<DeductionRule>> for RuleStore {
    fn from(rules: Vec<DeductionRule>) -> Self {
        Self::new(rules)
    }
}

/// Filters `rules` by business type. See [`RuleStore::deduction_rules`].
pub fn get_deduction_rules(
    rules: &[DeductionRule],
    business_type: &str,
    sector: Option<&str>,
) -> Vec<DeductionRule> {
    let Some(caller) = BusinessType::parse(business_type) else {
        debug!(business_type, "unknown business type, no rules match");
        return Vec::new();
    };

    let matched: Vec<DeductionRule> = rules
        .iter()
        .filter(|rule| rule.business_type.matches(caller))
        .cloned()
        .collect();

    debug!(
        business_type = caller.as_str(),
        sector,
        matched = matched.len(),
        total = rules.len(),
        "filtered deduction rules"
    );
    matched
}
