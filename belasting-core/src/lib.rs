pub mod advice;
pub mod calculations;
pub mod checklist;
pub mod db;
pub mod models;
pub mod rules;

pub use db::repository::{AdviceRepository, RepositoryError};
pub use models::*;
