use actix_web::{HttpResponse, web};
use belasting_core::BusinessType;
use belasting_core::checklist::build_checklist;
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessTypeQuery {
    pub business_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDeadlineRequest {
    pub is_completed: bool,
}

/// GET /api/deadlines?businessType=
///
/// Without a business type every deadline is returned; an unknown one
/// matches nothing.
pub async fn list_deadlines(
    state: web::Data<AppState>,
    query: web::Query<BusinessTypeQuery>,
) -> ApiResult<HttpResponse> {
    let deadlines = state.repo.list_tax_deadlines().await?;

    let deadlines = match query.business_type.as_deref() {
        None => deadlines,
        Some(raw) => match BusinessType::parse(raw) {
            Some(caller) => deadlines
                .into_iter()
                .filter(|d| d.business_type.matches(caller))
                .collect(),
            None => Vec::new(),
        },
    };

    Ok(HttpResponse::Ok().json(deadlines))
}

/// POST /api/deadlines/{id}/complete
pub async fn complete_deadline(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CompleteDeadlineRequest>,
) -> ApiResult<HttpResponse> {
    let id = id.into_inner();
    let deadline = state
        .repo
        .set_deadline_completed(id, body.is_completed)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::NotFound(_) => ApiError::NotFound(format!("deadline {id}")),
            other => other,
        })?;

    info!(id, is_completed = deadline.is_completed, "deadline updated");
    Ok(HttpResponse::Ok().json(deadline))
}

/// GET /api/checklist?businessType=
pub async fn checklist(
    state: web::Data<AppState>,
    query: web::Query<BusinessTypeQuery>,
) -> ApiResult<HttpResponse> {
    let raw = query
        .business_type
        .as_deref()
        .ok_or_else(|| ApiError::validation("businessType is required"))?;
    let business_type = BusinessType::parse(raw).ok_or_else(|| {
        ApiError::validation(format!("unknown businessType '{raw}', expected zzp, bv or both"))
    })?;

    let deadlines = state.repo.list_tax_deadlines().await?;
    let items = build_checklist(&deadlines, business_type, state.today());

    Ok(HttpResponse::Ok().json(items))
}
