//! Builds the filing to-do list shown on the dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BusinessType, DeadlineCategory, TaxDeadline};

/// Deadlines this close to `today` are flagged as due soon.
pub const DUE_SOON_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistStatus {
    Completed,
    Overdue,
    DueSoon,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub deadline_id: i64,
    pub title: String,
    pub category: DeadlineCategory,
    pub due_date: NaiveDate,
    /// Negative once the deadline has passed.
    pub days_remaining: i64,
    pub status: ChecklistStatus,
}

impl ChecklistItem {
    fn from_deadline(
        deadline: &TaxDeadline,
        today: NaiveDate,
    ) -> Self {
        let days_remaining = (deadline.due_date - today).num_days();
        let status = if deadline.is_completed {
            ChecklistStatus::Completed
        } else if days_remaining < 0 {
            ChecklistStatus::Overdue
        } else if days_remaining <= DUE_SOON_DAYS {
            ChecklistStatus::DueSoon
        } else {
            ChecklistStatus::Upcoming
        };

        Self {
            deadline_id: deadline.id,
            title: deadline.title.clone(),
            category: deadline.category,
            due_date: deadline.due_date,
            days_remaining,
            status,
        }
    }
}

/// Checklist for `business_type`, ordered by due date then id.
pub fn build_checklist(
    deadlines: &[TaxDeadline],
    business_type: BusinessType,
    today: NaiveDate,
) -> Vec<ChecklistItem> {
    let mut applicable: Vec<&TaxDeadline> = deadlines
        .iter()
        .filter(|d| d.business_type.matches(business_type))
        .collect();
    applicable.sort_by_key(|d| (d.due_date, d.id));

    applicable
        .into_iter()
        .map(|d| ChecklistItem::from_deadline(d, today))
        .collect()
}
