//! Request types for the payroll engine API.
//!
//! Two request shapes reach the engine: the typed JSON body of `/calculate`
//! and the raw form fields of `/calculate/form`. Both convert into a
//! [`PayInput`] before any calculation runs.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{FilingStatus, PayFrequency, PayInput, PayType};

/// Request body for the `/calculate` endpoint.
///
/// Unknown `pay_frequency`, `filing_status` or `pay_type` strings fail
/// deserialization, so they never reach the rate table.
///
/// # Example
///
/// ```json
/// {
///   "pay_type": { "type": "salary", "annual_salary": "78000" },
///   "pay_frequency": "weekly",
///   "filing_status": "single",
///   "local_tax_percent": "1"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Hourly or salaried earnings.
    pub pay_type: PayType,
    /// How often the employee is paid.
    pub pay_frequency: PayFrequency,
    /// Federal filing status.
    pub filing_status: FilingStatus,
    /// Pre-tax deductions per period.
    #[serde(default)]
    pub pre_tax_deductions: Decimal,
    /// Post-tax deductions per period.
    #[serde(default)]
    pub post_tax_deductions: Decimal,
    /// Local income tax as a percentage (1 means 1%).
    #[serde(default)]
    pub local_tax_percent: Decimal,
}

impl TryFrom<CalculationRequest> for PayInput {
    type Error = EngineError;

    fn try_from(request: CalculationRequest) -> Result<Self, Self::Error> {
        Ok(PayInput {
            pay_type: request.pay_type,
            pay_frequency: request.pay_frequency,
            filing_status: request.filing_status,
            pre_tax_deductions: request.pre_tax_deductions,
            post_tax_deductions: request.post_tax_deductions,
            local_tax_rate: percent_to_fraction("local_tax_percent", request.local_tax_percent)?,
        })
    }
}

/// Raw fields posted by the pay calculator form to `/calculate/form`.
///
/// Every field arrives as text. Blank or unparsable numeric fields are read
/// as 0, matching what the form has always done; a blank required field is
/// therefore not reported as an error. Select fields must hold one of their
/// known values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    /// `hourly` or `salary`.
    pub pay_type: Option<String>,
    /// A pay frequency key such as `weekly` or `semi-monthly`.
    pub pay_frequency: Option<String>,
    /// `single` or `married`.
    pub filing_status: Option<String>,
    /// Pay per regular hour.
    pub hourly_rate: Option<String>,
    /// Regular hours in the period.
    pub regular_hours: Option<String>,
    /// Overtime hours in the period.
    pub overtime_hours: Option<String>,
    /// Annual salary.
    pub annual_salary: Option<String>,
    /// Pre-tax deductions per period.
    pub pre_tax_deductions: Option<String>,
    /// Post-tax deductions per period.
    pub post_tax_deductions: Option<String>,
    /// Local income tax percentage.
    pub local_tax: Option<String>,
}

impl TryFrom<FormSubmission> for PayInput {
    type Error = EngineError;

    fn try_from(form: FormSubmission) -> Result<Self, Self::Error> {
        let pay_type = match form.pay_type.as_deref().map(str::trim) {
            Some("hourly") => PayType::Hourly {
                hourly_rate: parse_amount(form.hourly_rate.as_deref()),
                regular_hours: parse_amount(form.regular_hours.as_deref()),
                overtime_hours: parse_amount(form.overtime_hours.as_deref()),
            },
            Some("salary") => PayType::Salary {
                annual_salary: parse_amount(form.annual_salary.as_deref()),
            },
            other => return Err(unknown_choice("payType", other, &["hourly", "salary"])),
        };

        let frequency_key = form.pay_frequency.as_deref().map(str::trim);
        let pay_frequency = frequency_key
            .and_then(PayFrequency::parse)
            .ok_or_else(|| {
                let known: Vec<&str> = PayFrequency::ALL.iter().map(|f| f.as_str()).collect();
                unknown_choice("payFrequency", frequency_key, &known)
            })?;

        let status_key = form.filing_status.as_deref().map(str::trim);
        let filing_status = status_key.and_then(FilingStatus::parse).ok_or_else(|| {
            let known: Vec<&str> = FilingStatus::ALL.iter().map(|s| s.as_str()).collect();
            unknown_choice("filingStatus", status_key, &known)
        })?;

        Ok(PayInput {
            pay_type,
            pay_frequency,
            filing_status,
            pre_tax_deductions: parse_amount(form.pre_tax_deductions.as_deref()),
            post_tax_deductions: parse_amount(form.post_tax_deductions.as_deref()),
            local_tax_rate: percent_to_fraction(
                "localTax",
                parse_amount(form.local_tax.as_deref()),
            )?,
        })
    }
}

/// Reads a numeric form field.
///
/// Only the leading number is read, so `"12abc"` is 12 and `"78,000"` is 78.
/// Blank text, or text that does not start with a number, reads as 0.
pub fn parse_amount(raw: Option<&str>) -> Decimal {
    let text = raw.map(str::trim).unwrap_or_default();
    let Some(number) = leading_number(text) else {
        return Decimal::ZERO;
    };
    let parsed = if number.contains('e') {
        Decimal::from_scientific(&number)
    } else {
        Decimal::from_str(&number)
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Extracts `[sign] digits [. digits] [e [sign] digits]` from the start of
/// `text`, with a `0` supplied when the integer part is empty.
fn leading_number(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    let mut number = String::new();
    match bytes.first() {
        Some(b'-') => {
            number.push('-');
            pos = 1;
        }
        Some(b'+') => pos = 1,
        _ => {}
    }

    let int_len = digits_from(pos);
    let int_part = &text[pos..pos + int_len];
    pos += int_len;

    let mut frac_part = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_len = digits_from(pos + 1);
        frac_part = &text[pos + 1..pos + 1 + frac_len];
        if frac_len > 0 {
            pos += 1 + frac_len;
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    number.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        number.push('.');
        number.push_str(frac_part);
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_negative = bytes.get(exp_pos) == Some(&b'-');
        if matches!(bytes.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_len = digits_from(exp_pos);
        if exp_len > 0 {
            number.push('e');
            if exp_negative {
                number.push('-');
            }
            number.push_str(&text[exp_pos..exp_pos + exp_len]);
        }
    }

    Some(number)
}

/// Converts a percentage in `[0, 100]` to a fraction.
fn percent_to_fraction(field: &str, percent: Decimal) -> Result<Decimal, EngineError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid_input(
            field,
            format!("must be a percentage between 0 and 100, got {}", percent),
        ));
    }
    Ok(percent / Decimal::ONE_HUNDRED)
}

fn unknown_choice(field: &str, value: Option<&str>, known: &[&str]) -> EngineError {
    let message = match value {
        Some(v) if !v.is_empty() => format!("unknown value '{}', expected one of: {}", v, known.join(", ")),
        _ => format!("is required, expected one of: {}", known.join(", ")),
    };
    EngineError::invalid_input(field, message)
}
