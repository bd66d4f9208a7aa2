use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use super::resolver::generate_tax_advice;
use crate::models::{AdviceRequest, TaxAdviceResponse};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdviceError {
    #[error("advice provider unavailable: {0}")]
    Unavailable(String),
}

/// Something that can answer a tax question.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn advise(
        &self,
        request: &AdviceRequest,
    ) -> Result<TaxAdviceResponse, AdviceError>;
}

/// Answers from the built-in keyword table. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAdvisor;

#[async_trait]
impl AdviceProvider for RuleBasedAdvisor {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    async fn advise(
        &self,
        request: &AdviceRequest,
    ) -> Result<TaxAdviceResponse, AdviceError> {
        Ok(generate_tax_advice(
            &request.question,
            request.business_type.as_deref(),
            request.sector.as_deref(),
        ))
    }
}

/// Tries an optional primary provider and answers from the keyword table
/// whenever the primary is absent or fails.
pub struct FallbackAdvisor {
    primary: Option<Box<dyn AdviceProvider>>,
}

impl FallbackAdvisor {
    pub fn new(primary: Option<Box<dyn AdviceProvider>>) -> Self {
        Self { primary }
    }

    /// Keyword table only.
    pub fn rule_based() -> Self {
        Self::new(None)
    }

    pub fn primary_name(&self) -> Option<&'static str> {
        self.primary.as_ref().map(|p| p.name())
    }

    pub async fn advise(
        &self,
        request: &AdviceRequest,
    ) -> TaxAdviceResponse {
        if let Some(primary) = &self.primary {
            match primary.advise(request).await {
                Ok(response) => return response,
                Err(error) => {
                    warn!(
                        provider = primary.name(),
                        %error,
                        "advice provider failed, falling back to rule-based advice"
                    );
                }
            }
        }

        generate_tax_advice(
            &request.question,
            request.business_type.as_deref(),
            request.sector.as_deref(),
        )
    }
}

impl Default for FallbackAdvisor {
    fn default() -> Self {
        Self::rule_based()
    }
}

impl std::fmt::Debug for FallbackAdvisor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("FallbackAdvisor")
            .field("primary", &self.primary_name())
            .field("fallback", &RuleBasedAdvisor.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::AdviceCategory;

    /// Returns a fixed answer and counts how often it was asked.
    struct CannedProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AdviceProvider for CannedProvider {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn advise(
            &self,
            _request: &AdviceRequest,
        ) -> Result<TaxAdviceResponse, AdviceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TaxAdviceResponse {
                answer: "canned".to_string(),
                details: String::new(),
                tip: String::new(),
                category: AdviceCategory::Algemeen,
                confidence: 1.0,
            })
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl AdviceProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn advise(
            &self,
            _request: &AdviceRequest,
        ) -> Result<TaxAdviceResponse, AdviceError> {
            Err(AdviceError::Unavailable("no api key".to_string()))
        }
    }

    #[tokio::test]
    async fn rule_based_advisor_uses_keyword_table() {
        let response = RuleBasedAdvisor
            .advise(&AdviceRequest::new("Mijn laptop"))
            .await
            .unwrap();

        assert_eq!(response.category, AdviceCategory::Aftrekposten);
        assert_eq!(response.confidence, 0.95);
    }

    #[tokio::test]
    async fn without_primary_answers_from_keyword_table() {
        let advisor = FallbackAdvisor::rule_based();

        let response = advisor.advise(&AdviceRequest::new("btw")).await;

        assert_eq!(response, generate_tax_advice("btw", None, None));
        assert_eq!(advisor.primary_name(), None);
    }

    #[tokio::test]
    async fn healthy_primary_answer_is_returned() {
        let calls = Arc::new(AtomicUsize::new(0));
        let advisor = FallbackAdvisor::new(Some(Box::new(CannedProvider {
            calls: calls.clone(),
        })));

        let response = advisor.advise(&AdviceRequest::new("laptop")).await;

        assert_eq!(response.answer, "canned");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_primary_falls_back_to_keyword_table() {
        let advisor = FallbackAdvisor::new(Some(Box::new(FailingProvider)));

        let response = advisor.advise(&AdviceRequest::new("Mijn auto")).await;

        assert_eq!(response, generate_tax_advice("Mijn auto", None, None));
        assert_eq!(advisor.primary_name(), Some("failing"));
    }

    #[test]
    fn debug_output_names_providers() {
        let advisor = FallbackAdvisor::new(Some(Box::new(FailingProvider)));

        let debug = format!("{advisor:?}");

        assert!(debug.contains("failing"));
        assert!(debug.contains("rule-based"));
    }
}
