//! End-to-end tests of the HTTP surface against a seeded in-memory database.

use actix_web::{App, http::StatusCode, test, web};
use belasting_api::{app, routes, state::AppState};
use belasting_core::db::DbConfig;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

async fn test_state() -> web::Data<AppState> {
    let repo = app::connect(&DbConfig::default())
        .await
        .expect("Failed to open in-memory database");
    let today = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
    web::Data::new(AppState::new(repo).with_today(today))
}

macro_rules! init_app {
    () => {{
        let state = test_state().await;
        test::init_service(App::new().app_data(state).configure(routes::configure)).await
    }};
}

#[actix_web::test]
async fn health_reports_service_name() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({"status": "healthy", "service": "belasting-api"}));
}

// =========================================================================
// tax advice
// =========================================================================

#[actix_web::test]
async fn tax_advice_answers_laptop_question() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/tax-advice")
        .set_json(json!({"question": "Kan ik mijn LAPTOP aftrekken?", "businessType": "zzp"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["category"], "aftrekposten");
    assert_eq!(body["confidence"], 0.95);
    for field in ["answer", "details", "tip"] {
        assert!(body[field].as_str().is_some_and(|s| !s.is_empty()), "{field} missing");
    }
}

#[actix_web::test]
async fn tax_advice_prefers_laptop_over_car() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/tax-advice")
        .set_json(json!({"question": "laptop in de auto"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["category"], "aftrekposten");
}

#[actix_web::test]
async fn tax_advice_falls_back_for_unmatched_question() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/tax-advice")
        .set_json(json!({"question": "Wat is het weer morgen?"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["category"], "algemeen");
    assert_eq!(body["confidence"], 0.3);
}

#[actix_web::test]
async fn tax_advice_without_question_is_bad_request() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/tax-advice")
        .set_json(json!({"businessType": "zzp"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}

// =========================================================================
// deductions
// =========================================================================

async fn fetch_deductions(uri: &str) -> Vec<Value> {
    let app = init_app!();
    let req = test::TestRequest::get().uri(uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    body.as_array().cloned().expect("expected a JSON array")
}

#[actix_web::test]
async fn deductions_for_zzp_exclude_bv_rules() {
    let rules = fetch_deductions("/api/deductions?businessType=zzp").await;

    assert_eq!(rules.len(), 17);
    assert!(rules.iter().all(|r| r["businessType"] != "bv"));
    assert_eq!(rules[0]["item"], "Laptop en computer");
    assert_eq!(rules[0]["percentage"], Value::Null);
}

#[actix_web::test]
async fn deductions_for_bv_exclude_zzp_rules() {
    let rules = fetch_deductions("/api/deductions?businessType=bv").await;

    assert_eq!(rules.len(), 12);
    assert!(rules.iter().all(|r| r["businessType"] != "zzp"));
}

#[actix_web::test]
async fn deductions_sector_does_not_filter() {
    let all = fetch_deductions("/api/deductions?businessType=zzp").await;
    let horeca = fetch_deductions("/api/deductions?businessType=zzp&sector=horeca").await;

    assert_eq!(all, horeca);
}

#[actix_web::test]
async fn deductions_unknown_or_missing_business_type_is_empty() {
    assert!(fetch_deductions("/api/deductions?businessType=nv").await.is_empty());
    assert!(fetch_deductions("/api/deductions").await.is_empty());
}

#[actix_web::test]
async fn deductions_serialize_percentage_as_number() {
    let rules = fetch_deductions("/api/deductions?businessType=both").await;

    let representatie = rules
        .iter()
        .find(|r| r["category"] == "representatie")
        .expect("representatie rule");
    assert_eq!(representatie["percentage"], 80.0);
}

// =========================================================================
// deadlines & checklist
// =========================================================================

#[actix_web::test]
async fn deadlines_filter_by_business_type() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/deadlines").to_request();
    let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 7);
    assert_eq!(all[0]["dueDate"], "2025-01-31");

    let req = test::TestRequest::get().uri("/api/deadlines?businessType=zzp").to_request();
    let zzp: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(zzp.len(), 5);
    assert!(zzp.iter().all(|d| d["category"] != "jaarrekening"));
}

#[actix_web::test]
async fn complete_deadline_updates_flag() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/deadlines/2/complete")
        .set_json(json!({"isCompleted": true}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], 2);
    assert_eq!(body["isCompleted"], true);
}

#[actix_web::test]
async fn complete_unknown_deadline_is_not_found() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/deadlines/999/complete")
        .set_json(json!({"isCompleted": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Not found: deadline 999");
}

#[actix_web::test]
async fn checklist_statuses_relative_to_today() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/deadlines/1/complete")
        .set_json(json!({"isCompleted": true}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/checklist?businessType=zzp").to_request();
    let items: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    // today is 2025-04-20
    let statuses: Vec<&str> = items.iter().map(|i| i["status"].as_str().unwrap()).collect();
    assert_eq!(
        statuses,
        vec!["completed", "dueSoon", "dueSoon", "upcoming", "upcoming"]
    );
    assert_eq!(items[1]["deadlineId"], 2);
    assert_eq!(items[1]["daysRemaining"], 10);
}

#[actix_web::test]
async fn checklist_requires_valid_business_type() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/checklist").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/checklist?businessType=nv").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

// =========================================================================
// calculators
// =========================================================================

#[actix_web::test]
async fn savings_reference_scenario() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/savings")
        .set_json(json!({"income": 60000, "expenses": 15000, "mileageKm": 8000}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["mileageDeduction"], 1840.0);
    assert_eq!(body["taxableIncome"], 43160.0);
    assert_eq!(body["taxRate"], 0.3793);
    assert_eq!(body["netIncome"], 30250.0);
    assert_eq!(body["currentTax"], 29750.0);
    assert_eq!(body["potentialSavings"], 3205.0);
    assert_eq!(body["additionalDeductions"], 4800.0);
}

#[actix_web::test]
async fn savings_accepts_strings_and_degrades_garbage_to_zero() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/savings")
        .set_json(json!({"income": "60,000", "expenses": "abc"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["mileageDeduction"], 0.0);
    assert_eq!(body["taxableIncome"], 60000.0);
}

#[actix_web::test]
async fn btw_adds_and_extracts() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/btw")
        .set_json(json!({"amount": 100, "rate": 21}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"net": 100.0, "btw": 21.0, "gross": 121.0, "rate": "standard"}));

    let req = test::TestRequest::post()
        .uri("/api/btw")
        .set_json(json!({"amount": 109, "rate": "9", "includesBtw": true}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["net"], 100.0);
    assert_eq!(body["btw"], 9.0);
}

#[actix_web::test]
async fn btw_rejects_unsupported_rate_and_negative_amount() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/btw")
        .set_json(json!({"amount": 100, "rate": 19}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/btw")
        .set_json(json!({"amount": -1, "rate": 21}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn savings_with_extreme_amounts_still_answers() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/savings")
        .set_json(json!({
            "income": "79228162514264337593543950335",
            "expenses": "-79228162514264337593543950335"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["taxRate"], 0.3793);
    assert!(body["netIncome"].as_f64().is_some_and(|n| n > 0.0));
}

#[actix_web::test]
async fn savings_accepts_exponent_notation() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/savings")
        .set_json(json!({"income": 1e21}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["taxableIncome"], 1e21);
}

#[actix_web::test]
async fn btw_rejects_amount_too_large_to_add_btw() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/btw")
        .set_json(json!({"amount": 7e28, "rate": 21}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}
