mod business_type;
mod deduction_rule;
mod tax_advice;
mod tax_deadline;

pub use business_type::BusinessType;
pub use deduction_rule::{DeductionRule, NewDeductionRule, is_valid_percentage};
pub use tax_advice::{AdviceCategory, AdviceRequest, TaxAdviceResponse};
pub use tax_deadline::{DeadlineCategory, TaxDeadline};
