//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::ENGINE_VERSION;
use crate::calculation::calculate_net_pay;
use crate::error::EngineError;
use crate::models::PayInput;

use super::request::{CalculationRequest, FormSubmission};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, PayStubDisplay, RatesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/form", post(calculate_form_handler))
        .route("/rates", get(rates_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a typed JSON request and returns the net-pay breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") || body_text.contains("unknown variant")
                    {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    match PayInput::try_from(request) {
        Ok(input) => calculate_and_respond(&state, correlation_id, input),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /calculate/form endpoint.
///
/// Accepts the pay calculator's raw url-encoded form fields.
async fn calculate_form_handler(
    State(state): State<AppState>,
    payload: Result<Form<FormSubmission>, FormRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing form submission");

    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Form rejected"
            );
            return ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response();
        }
    };

    match PayInput::try_from(form) {
        Ok(input) => calculate_and_respond(&state, correlation_id, input),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /rates endpoint.
async fn rates_handler(State(state): State<AppState>) -> Response {
    let body = RatesResponse {
        engine_version: ENGINE_VERSION.to_string(),
        rate_table: state.rate_table().clone(),
    };
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn calculate_and_respond(state: &AppState, correlation_id: Uuid, input: PayInput) -> Response {
    let rate_table = state.rate_table();
    let start_time = Instant::now();

    match calculate_net_pay(&input, rate_table) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                pay_type = input.pay_type.as_str(),
                pay_frequency = %input.pay_frequency,
                gross_pay = %result.gross_pay,
                net_pay = %result.net_pay,
                warnings = result.audit_trace.warnings.len(),
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            let body = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: ENGINE_VERSION.to_string(),
                tax_year: rate_table.tax_year(),
                display: PayStubDisplay::from(&result),
                result,
                duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    if err.is_recoverable() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Calculation rejected"
        );
    } else {
        error!(
            correlation_id = %correlation_id,
            error = %err,
            "Calculation failed"
        );
    }
    ApiErrorResponse::from(err).into_response()
}
