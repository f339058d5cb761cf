//! HTTP API module for the payroll engine.
//!
//! This module exposes the calculation pipeline over HTTP: a typed JSON
//! endpoint, a raw form endpoint for the pay calculator page, and a read-only
//! view of the active rate table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, FormSubmission, parse_amount};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, PayStubDisplay, RatesResponse,
    format_currency, round_half_up,
};
pub use state::AppState;
