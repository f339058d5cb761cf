//! Pay input validation.
//!
//! Every check here runs before gross pay is computed, so an invalid input
//! never produces a partial result.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayInput, PayType};

/// Largest accepted money amount (rate, salary or deduction).
///
/// Together with [`MAX_HOURS`] this keeps every product the pipeline forms
/// far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest accepted hour count for one pay period.
pub const MAX_HOURS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Validates a pay input before any calculation stage runs.
///
/// # Rules
///
/// - Hourly: `hourly_rate > 0`, `regular_hours >= 0`, `overtime_hours >= 0`
/// - Salary: `annual_salary > 0`
/// - `pre_tax_deductions >= 0` and `post_tax_deductions >= 0`
/// - Money amounts are at most [`MAX_AMOUNT`], hours at most [`MAX_HOURS`]
/// - `local_tax_rate` is a fraction in `[0, 1]`
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming the first offending field.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_pay_input;
/// use payroll_engine::models::{FilingStatus, PayFrequency, PayInput, PayType};
/// use rust_decimal::Decimal;
///
/// let input = PayInput {
///     pay_type: PayType::Hourly {
///         hourly_rate: Decimal::ZERO,
///         regular_hours: Decimal::from(40),
///         overtime_hours: Decimal::ZERO,
///     },
///     pay_frequency: PayFrequency::Weekly,
///     filing_status: FilingStatus::Single,
///     pre_tax_deductions: Decimal::ZERO,
///     post_tax_deductions: Decimal::ZERO,
///     local_tax_rate: Decimal::ZERO,
/// };
///
/// assert!(validate_pay_input(&input, 1).is_err());
/// ```
pub fn validate_pay_input(input: &PayInput, step_number: u32) -> EngineResult<AuditStep> {
    match &input.pay_type {
        PayType::Hourly {
            hourly_rate,
            regular_hours,
            overtime_hours,
        } => {
            if *hourly_rate <= Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    "hourly_rate",
                    format!("must be greater than 0, got {}", hourly_rate),
                ));
            }
            require_at_most("hourly_rate", *hourly_rate, MAX_AMOUNT)?;
            require_non_negative("regular_hours", *regular_hours)?;
            require_at_most("regular_hours", *regular_hours, MAX_HOURS)?;
            require_non_negative("overtime_hours", *overtime_hours)?;
            require_at_most("overtime_hours", *overtime_hours, MAX_HOURS)?;
        }
        PayType::Salary { annual_salary } => {
            if *annual_salary <= Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    "annual_salary",
                    format!("must be greater than 0, got {}", annual_salary),
                ));
            }
            require_at_most("annual_salary", *annual_salary, MAX_AMOUNT)?;
        }
    }

    require_non_negative("pre_tax_deductions", input.pre_tax_deductions)?;
    require_at_most("pre_tax_deductions", input.pre_tax_deductions, MAX_AMOUNT)?;
    require_non_negative("post_tax_deductions", input.post_tax_deductions)?;
    require_at_most("post_tax_deductions", input.post_tax_deductions, MAX_AMOUNT)?;

    if input.local_tax_rate < Decimal::ZERO || input.local_tax_rate > Decimal::ONE {
        return Err(EngineError::invalid_input(
            "local_tax_rate",
            format!(
                "must be a fraction between 0 and 1, got {}",
                input.local_tax_rate
            ),
        ));
    }

    Ok(AuditStep {
        step_number,
        rule_id: "input_validation".to_string(),
        rule_name: "Input Validation".to_string(),
        input: serde_json::json!({
            "pay_type": input.pay_type.as_str(),
            "pay_frequency": input.pay_frequency.as_str(),
            "filing_status": input.filing_status.as_str(),
            "pre_tax_deductions": input.pre_tax_deductions.normalize().to_string(),
            "post_tax_deductions": input.post_tax_deductions.normalize().to_string(),
            "local_tax_rate": input.local_tax_rate.normalize().to_string()
        }),
        output: serde_json::json!({ "valid": true }),
        reasoning: format!(
            "{} input for {} {} filer accepted",
            input.pay_type.as_str(),
            input.pay_frequency,
            input.filing_status
        ),
    })
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

fn require_at_most(field: &str, value: Decimal, limit: Decimal) -> EngineResult<()> {
    if value > limit {
        return Err(EngineError::invalid_input(
            field,
            format!("must not exceed {}, got {}", limit, value),
        ));
    }
    Ok(())
}
