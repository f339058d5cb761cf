//! Response types for the payroll engine API.
//!
//! This module defines the success envelope, the pay-stub display block,
//! and the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RateTable;
use crate::error::EngineError;
use crate::models::CalculationResult;

/// Rounds an amount to cents, halves away from zero.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars and cents.
///
/// # Examples
///
/// ```
/// use payroll_engine::api::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(1500)), "$1500.00");
/// assert_eq!(format_currency(Decimal::from_str("177.990384").unwrap()), "$177.99");
/// assert_eq!(format_currency(Decimal::from_str("-12.345").unwrap()), "-$12.35");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// A calculation result formatted for a pay stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStubDisplay {
    /// Label for the period the amounts cover (e.g., "per week").
    pub period_label: String,
    /// Gross pay.
    pub gross_pay: String,
    /// Pre-tax deductions.
    pub pre_tax_deductions: String,
    /// Taxable income.
    pub taxable_income: String,
    /// Federal income tax.
    pub federal_tax: String,
    /// Social-security tax.
    pub social_security: String,
    /// Medicare tax.
    pub medicare: String,
    /// State income tax.
    pub state_tax: String,
    /// Local income tax.
    pub local_tax: String,
    /// Post-tax deductions.
    pub post_tax_deductions: String,
    /// Total deductions.
    pub total_deductions: String,
    /// Net pay.
    pub net_pay: String,
    /// Whether the local tax line should be shown.
    pub show_local_tax: bool,
}

impl From<&CalculationResult> for PayStubDisplay {
    fn from(result: &CalculationResult) -> Self {
        Self {
            period_label: result.pay_frequency.period_label().to_string(),
            gross_pay: format_currency(result.gross_pay),
            pre_tax_deductions: format_currency(result.pre_tax_deductions),
            taxable_income: format_currency(result.taxable_income),
            federal_tax: format_currency(result.federal_tax),
            social_security: format_currency(result.social_security),
            medicare: format_currency(result.medicare),
            state_tax: format_currency(result.state_tax),
            local_tax: format_currency(result.local_tax),
            post_tax_deductions: format_currency(result.post_tax_deductions),
            total_deductions: format_currency(result.total_deductions),
            net_pay: format_currency(result.net_pay),
            show_local_tax: result.has_local_tax(),
        }
    }
}

/// Success body for the calculation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tax year of the rate table used.
    pub tax_year: i32,
    /// The full-precision result with its audit trace.
    pub result: CalculationResult,
    /// The result formatted for display.
    pub display: PayStubDisplay,
    /// How long the calculation took, in microseconds.
    pub duration_us: u64,
}

/// Body for the `/rates` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RatesResponse {
    /// The version of the engine serving the table.
    pub engine_version: String,
    /// The active rate table.
    pub rate_table: RateTable,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("Correct the '{}' field and resubmit", field),
                ),
            },
            EngineError::ConfigLookup { table, key } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_LOOKUP_ERROR",
                    "Rate table lookup failed",
                    format!("No '{}' entry for '{}'", table, key),
                ),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidRateTable { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
        }
    }
}
