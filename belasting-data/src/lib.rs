pub mod loader;

pub use loader::{DeductionRuleLoader, DeductionRuleLoaderError, DeductionRuleRecord};
