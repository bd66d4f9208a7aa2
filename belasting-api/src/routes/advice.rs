use actix_web::{HttpResponse, web};
use belasting_core::AdviceRequest;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/tax-advice
///
/// Always answers: the rule-based table covers any question the configured
/// provider cannot.
pub async fn tax_advice(
    state: web::Data<AppState>,
    request: web::Json<AdviceRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    let response = state.advisor.advise(&request).await;

    debug!(
        category = response.category.as_str(),
        confidence = response.confidence,
        "answered tax question"
    );
    Ok(HttpResponse::Ok().json(response))
}
