//! Tax advice for free-text questions.
//!
//! [`resolver`] holds the deterministic keyword table; [`provider`] wraps it
//! behind the [`AdviceProvider`] seam so an external model can answer first
//! and the table can take over when that model is missing or fails.

pub mod provider;
pub mod resolver;

pub use provider::{AdviceError, AdviceProvider, FallbackAdvisor, RuleBasedAdvisor};
pub use resolver::{AdviceTemplate, AdviceTopic, generate_tax_advice};
