use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceCategory {
    Aftrekposten,
    Transport,
    Btw,
    Algemeen,
}

impl AdviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aftrekposten => "aftrekposten",
            Self::Transport => "transport",
            Self::Btw => "btw",
            Self::Algemeen => "algemeen",
        }
    }
}

/// A question for the advisor, with optional caller context.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub question: String,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

impl AdviceRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }
}

/// Structured answer produced per request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAdviceResponse {
    pub answer: String,
    pub details: String,
    pub tip: String,
    pub category: AdviceCategory,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}
