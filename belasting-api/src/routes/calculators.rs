use actix_web::{HttpResponse, web};
use belasting_core::calculations::{BtwRate, SavingsInput, SavingsWorksheet, calculate_btw};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::input::deserialize_lenient_amount;

/// Savings form as typed by the user. Every field may be a number, a
/// numeric string or missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRequest {
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub income: Decimal,
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub expenses: Decimal,
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub mileage_km: Decimal,
}

impl From<SavingsRequest> for SavingsInput {
    fn from(req: SavingsRequest) -> Self {
        SavingsInput {
            income: req.income,
            expenses: req.expenses,
            mileage_km: req.mileage_km,
        }
    }
}

/// POST /api/savings
pub async fn savings(body: web::Json<SavingsRequest>) -> HttpResponse {
    let input = SavingsInput::from(body.into_inner());
    let estimate = SavingsWorksheet::default().calculate(&input);

    HttpResponse::Ok().json(estimate)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtwRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// `21`, `9` or `0`, as number or string.
    pub rate: serde_json::Value,
    #[serde(default)]
    pub includes_btw: bool,
}

/// POST /api/btw
pub async fn btw(body: web::Json<BtwRequest>) -> ApiResult<HttpResponse> {
    let rate = match &body.rate {
        serde_json::Value::Number(n) => BtwRate::parse(&n.to_string())?,
        serde_json::Value::String(s) => BtwRate::parse(s)?,
        other => {
            return Err(ApiError::validation(format!(
                "rate must be 21, 9 or 0, got {other}"
            )));
        }
    };

    let calculation = calculate_btw(body.amount, rate, body.includes_btw)?;
    Ok(HttpResponse::Ok().json(calculation))
}
