use std::sync::Arc;

use belasting_core::AdviceRepository;
use belasting_core::advice::FallbackAdvisor;
use chrono::{Local, NaiveDate};

/// Shared, read-mostly state handed to every handler.
pub struct AppState {
    pub repo: Arc<dyn AdviceRepository>,
    pub advisor: FallbackAdvisor,
    /// Fixed "today" for the checklist; `None` means the local date.
    pub today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(repo: Arc<dyn AdviceRepository>) -> Self {
        Self {
            repo,
            advisor: FallbackAdvisor::rule_based(),
            today: None,
        }
    }

    pub fn with_advisor(
        mut self,
        advisor: FallbackAdvisor,
    ) -> Self {
        self.advisor = advisor;
        self
    }

    pub fn with_today(
        mut self,
        today: NaiveDate,
    ) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
