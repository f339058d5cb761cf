//! Core data models for the payroll engine.
//!
//! This module contains the pay input consumed by the pipeline and the
//! result it produces.

mod calculation_result;
mod pay_input;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use pay_input::{FilingStatus, PayFrequency, PayInput, PayType};
