use actix_web::web;

use crate::error::ApiError;

pub mod advice;
pub mod calculators;
pub mod deadlines;
pub mod deductions;
pub mod health;

/// Register every route plus extractor configs that turn malformed
/// requests into `ApiError::Validation` bodies.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .route("/tax-advice", web::post().to(advice::tax_advice))
            .route("/deductions", web::get().to(deductions::list_deductions))
            .route("/deadlines", web::get().to(deadlines::list_deadlines))
            .route(
                "/deadlines/{id}/complete",
                web::post().to(deadlines::complete_deadline),
            )
            .route("/checklist", web::get().to(deadlines::checklist))
            .route("/savings", web::post().to(calculators::savings))
            .route("/btw", web::post().to(calculators::btw)),
    );
}
