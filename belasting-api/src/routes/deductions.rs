use actix_web::{HttpResponse, web};
use belasting_core::rules::RuleStore;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionsQuery {
    #[serde(default)]
    pub business_type: String,
    pub sector: Option<String>,
}

/// GET /api/deductions?businessType=&sector=
///
/// An unknown or missing business type yields an empty list.
pub async fn list_deductions(
    state: web::Data<AppState>,
    query: web::Query<DeductionsQuery>,
) -> ApiResult<HttpResponse> {
    let store = RuleStore::new(state.repo.list_deduction_rules().await?);
    let rules = store.deduction_rules(&query.business_type, query.sector.as_deref());

    Ok(HttpResponse::Ok().json(rules))
}
