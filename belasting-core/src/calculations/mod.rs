//! Deterministic calculators behind the dashboard.
//!
//! Everything here is pure: no I/O, no shared state, safe to call from any
//! number of request handlers at once.

pub mod btw;
pub mod common;
pub mod savings;

pub use btw::{BtwCalculation, BtwError, BtwRate, calculate_btw};
pub use savings::{SavingsConfig, SavingsEstimate, SavingsInput, SavingsWorksheet, calculate_savings};
