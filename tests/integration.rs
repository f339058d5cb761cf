//! Integration tests for the payroll engine.
//!
//! This suite drives the HTTP router end to end:
//! - Salaried and hourly calculations across pay frequencies
//! - Pre-tax, post-tax and local tax handling
//! - The raw form endpoint and its blank-field behavior
//! - The rate table endpoint
//! - Error mapping for invalid and malformed requests

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config/us_2024").expect("Failed to load config");
    AppState::new(loader.into_rate_table())
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn post_form(router: Router, body: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate/form")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

fn salary_request(salary: &str, frequency: &str, status: &str) -> Value {
    json!({
        "pay_type": { "type": "salary", "annual_salary": salary },
        "pay_frequency": frequency,
        "filing_status": status
    })
}

fn hourly_request(rate: &str, regular: &str, overtime: &str) -> Value {
    json!({
        "pay_type": {
            "type": "hourly",
            "hourly_rate": rate,
            "regular_hours": regular,
            "overtime_hours": overtime
        },
        "pay_frequency": "weekly",
        "filing_status": "single"
    })
}

fn amount(result: &Value, field: &str) -> Decimal {
    decimal(result["result"][field].as_str().unwrap())
}

fn assert_aggregation_holds(result: &Value) {
    let sum = amount(result, "pre_tax_deductions")
        + amount(result, "federal_tax")
        + amount(result, "social_security")
        + amount(result, "medicare")
        + amount(result, "state_tax")
        + amount(result, "local_tax")
        + amount(result, "post_tax_deductions");
    assert_eq!(amount(result, "total_deductions"), sum);
    assert_eq!(amount(result, "net_pay"), amount(result, "gross_pay") - sum);
}

// =============================================================================
// Salaried calculations
// =============================================================================

#[tokio::test]
async fn test_weekly_salary_single_filer() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        salary_request("78000", "weekly", "single"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "gross_pay"), decimal("1500"));
    assert_eq!(amount(&result, "social_security"), decimal("93"));
    assert_eq!(amount(&result, "medicare"), decimal("21.75"));
    assert_eq!(amount(&result, "state_tax"), decimal("46.05"));
    assert_eq!(amount(&result, "local_tax"), Decimal::ZERO);
    assert_aggregation_holds(&result);

    let display = &result["display"];
    assert_eq!(display["period_label"], "per week");
    assert_eq!(display["gross_pay"], "$1500.00");
    assert_eq!(display["federal_tax"], "$177.99");
    assert_eq!(display["social_security"], "$93.00");
    assert_eq!(display["medicare"], "$21.75");
    assert_eq!(display["state_tax"], "$46.05");
    assert_eq!(display["total_deductions"], "$338.79");
    assert_eq!(display["net_pay"], "$1161.21");
    assert_eq!(display["show_local_tax"], false);
}

#[tokio::test]
async fn test_response_envelope() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        salary_request("78000", "monthly", "married"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["calculation_id"].as_str().unwrap().len() == 36);
    assert!(result["timestamp"].is_string());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(result["tax_year"], 2024);
    assert!(result["duration_us"].is_u64());
    assert_eq!(result["result"]["pay_frequency"], "monthly");
    assert_eq!(result["display"]["period_label"], "per month");
}

#[tokio::test]
async fn test_every_frequency_has_its_label() {
    let cases = [
        ("weekly", "1500", "per week"),
        ("biweekly", "3000", "per paycheck (biweekly)"),
        ("semi-monthly", "3250", "per paycheck (semi-monthly)"),
        ("monthly", "6500", "per month"),
        ("annually", "78000", "per year"),
    ];

    for (frequency, gross, label) in cases {
        let (status, result) = post_calculate(
            create_router_for_test(),
            salary_request("78000", frequency, "single"),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "frequency {}", frequency);
        assert_eq!(amount(&result, "gross_pay"), decimal(gross));
        assert_eq!(result["display"]["period_label"], label);
        assert_aggregation_holds(&result);
    }
}

#[tokio::test]
async fn test_high_salary_hits_wage_base() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        salary_request("200000", "annually", "single"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "social_security"), decimal("9932.40"));
    assert_eq!(amount(&result, "medicare"), decimal("2900"));

    let steps = result["result"]["audit_trace"]["steps"].as_array().unwrap();
    let ss_step = steps
        .iter()
        .find(|s| s["rule_id"] == "social_security")
        .unwrap();
    assert_eq!(ss_step["output"]["social_security_wages"], "160200");
    assert_eq!(ss_step["output"]["wage_base_applied"], true);
}

// =============================================================================
// Hourly calculations
// =============================================================================

#[tokio::test]
async fn test_hourly_with_overtime() {
    let (status, result) =
        post_calculate(create_router_for_test(), hourly_request("20", "40", "5")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "gross_pay"), decimal("950"));
    assert_eq!(result["display"]["gross_pay"], "$950.00");
    assert_aggregation_holds(&result);
}

#[tokio::test]
async fn test_hourly_overtime_defaults_to_zero() {
    let body = json!({
        "pay_type": { "type": "hourly", "hourly_rate": "25", "regular_hours": "38" },
        "pay_frequency": "weekly",
        "filing_status": "single"
    });
    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "gross_pay"), decimal("950"));
}

#[tokio::test]
async fn test_audit_trace_lists_every_stage() {
    let (_, result) =
        post_calculate(create_router_for_test(), hourly_request("20", "40", "5")).await;

    let rule_ids: Vec<&str> = result["result"]["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();

    assert_eq!(
        rule_ids,
        vec![
            "input_validation",
            "gross_pay",
            "annualization",
            "taxable_income",
            "federal_income_tax",
            "social_security",
            "medicare",
            "state_tax",
            "local_tax",
            "net_pay",
        ]
    );
}

// =============================================================================
// Deductions and local tax
// =============================================================================

#[tokio::test]
async fn test_deductions_and_local_tax() {
    let body = json!({
        "pay_type": { "type": "salary", "annual_salary": "78000" },
        "pay_frequency": "biweekly",
        "filing_status": "single",
        "pre_tax_deductions": "200",
        "post_tax_deductions": "50",
        "local_tax_percent": "1"
    });
    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "taxable_income"), decimal("2800"));
    assert_eq!(amount(&result, "local_tax"), decimal("28"));
    assert_eq!(amount(&result, "state_tax"), decimal("85.96"));
    assert_eq!(result["display"]["local_tax"], "$28.00");
    assert_eq!(result["display"]["show_local_tax"], true);
    assert_aggregation_holds(&result);
}

#[tokio::test]
async fn test_negative_net_pay_is_returned_with_warning() {
    let body = json!({
        "pay_type": { "type": "hourly", "hourly_rate": "15", "regular_hours": "10" },
        "pay_frequency": "weekly",
        "filing_status": "single",
        "post_tax_deductions": "400"
    });
    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(amount(&result, "net_pay") < Decimal::ZERO);
    assert!(result["display"]["net_pay"].as_str().unwrap().starts_with("-$"));

    let warnings = result["result"]["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "NEGATIVE_NET_PAY"));
}

// =============================================================================
// Form endpoint
// =============================================================================

#[tokio::test]
async fn test_form_hourly_submission() {
    let body = "payType=hourly&payFrequency=weekly&filingStatus=single\
                &hourlyRate=20&regularHours=40&overtimeHours=5\
                &annualSalary=&preTaxDeductions=&postTaxDeductions=&localTax=0";
    let (status, result) = post_form(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "gross_pay"), decimal("950"));
    assert_eq!(result["display"]["show_local_tax"], false);
}

#[tokio::test]
async fn test_form_salary_with_local_percent() {
    let body = "payType=salary&payFrequency=semi-monthly&filingStatus=married\
                &annualSalary=78000&localTax=1";
    let (status, result) = post_form(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "gross_pay"), decimal("3250"));
    // 78000 x 0.01 / 24
    assert_eq!(amount(&result, "local_tax"), decimal("32.5"));
    assert_eq!(result["display"]["period_label"], "per paycheck (semi-monthly)");
}

#[tokio::test]
async fn test_form_blank_overtime_reads_as_zero() {
    let body = "payType=hourly&payFrequency=weekly&filingStatus=single\
                &hourlyRate=20&regularHours=40&overtimeHours=";
    let (status, result) = post_form(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "gross_pay"), decimal("800"));
}

#[tokio::test]
async fn test_form_blank_rate_is_rejected_by_validation() {
    let body = "payType=hourly&payFrequency=weekly&filingStatus=single\
                &hourlyRate=&regularHours=40";
    let (status, result) = post_form(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_INPUT");
    assert!(result["message"].as_str().unwrap().contains("hourly_rate"));
}

#[tokio::test]
async fn test_form_unknown_frequency_is_invalid_input() {
    let body = "payType=salary&payFrequency=fortnightly&filingStatus=single&annualSalary=78000";
    let (status, result) = post_form(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_INPUT");
    assert!(result["message"].as_str().unwrap().contains("payFrequency"));
}

// =============================================================================
// Rate table endpoint
// =============================================================================

#[tokio::test]
async fn test_rates_endpoint() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/rates")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::OK);
    let table = &body["rate_table"];
    assert_eq!(table["metadata"]["tax_year"], 2024);
    assert_eq!(table["metadata"]["state"]["code"], "PA");
    assert_eq!(table["federal_brackets"].as_array().unwrap().len(), 7);
    assert_eq!(table["standard_deductions"]["single"], "14600");
    assert_eq!(table["periods_per_year"]["semi-monthly"], 24);
    assert_eq!(table["fica"]["social_security_wage_base"], "160200");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_zero_hourly_rate_returns_422() {
    let (status, result) =
        post_calculate(create_router_for_test(), hourly_request("0", "40", "0")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_INPUT");
    assert!(result["details"].as_str().unwrap().contains("hourly_rate"));
}

#[tokio::test]
async fn test_negative_salary_returns_422() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        salary_request("-100", "weekly", "single"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_negative_hours_returns_422() {
    let (status, result) =
        post_calculate(create_router_for_test(), hourly_request("20", "-1", "0")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(result["message"].as_str().unwrap().contains("regular_hours"));
}

#[tokio::test]
async fn test_local_percent_out_of_range_returns_422() {
    let mut body = salary_request("78000", "weekly", "single");
    body["local_tax_percent"] = json!("101");
    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(result["message"].as_str().unwrap().contains("local_tax_percent"));
}

#[tokio::test]
async fn test_oversized_pre_tax_deduction_returns_422() {
    let mut body = salary_request("78000", "weekly", "single");
    body["pre_tax_deductions"] = json!("2000000000000000000000000000");
    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_INPUT");
    assert!(result["message"].as_str().unwrap().contains("pre_tax_deductions"));
}

#[tokio::test]
async fn test_oversized_hourly_rate_returns_422() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        hourly_request("10000000000000000000000000000", "40", "0"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(result["message"].as_str().unwrap().contains("hourly_rate"));
}

#[tokio::test]
async fn test_error_responses_are_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(hourly_request("0", "40", "0").to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["content-type"], "application/json");
    let (status, result) = read_json(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unknown_frequency_returns_400() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        salary_request("78000", "fortnightly", "single"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_field_returns_400() {
    let body = json!({
        "pay_type": { "type": "salary", "annual_salary": "78000" },
        "pay_frequency": "weekly"
    });
    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("filing_status"));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, result) = read_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}
