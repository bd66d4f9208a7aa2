use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BusinessType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineCategory {
    /// BTW-aangifte (VAT return).
    Btw,
    /// Inkomstenbelasting (income tax).
    Ib,
    /// Annual accounts.
    Jaarrekening,
}

impl DeadlineCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btw => "btw",
            Self::Ib => "ib",
            Self::Jaarrekening => "jaarrekening",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "btw" => Some(Self::Btw),
            "ib" => Some(Self::Ib),
            "jaarrekening" => Some(Self::Jaarrekening),
            _ => None,
        }
    }
}

/// A filing deadline. `is_completed` is the only field users change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDeadline {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub category: DeadlineCategory,
    pub business_type: BusinessType,
    pub is_completed: bool,
}
