//! Flat-rate state and local income tax.

use rust_decimal::Decimal;

use super::Annualizer;
use crate::config::StateTax;
use crate::models::AuditStep;

/// The result of a flat tax calculation.
#[derive(Debug, Clone)]
pub struct FlatTaxResult {
    /// Tax for the year.
    pub annual_tax: Decimal,
    /// Tax for one pay period.
    pub period_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the state's flat rate to annual taxable income.
pub fn calculate_state_tax(
    annual_taxable: Decimal,
    state: &StateTax,
    annualizer: &Annualizer,
    step_number: u32,
) -> FlatTaxResult {
    calculate_flat_tax(
        "state_tax",
        &format!("State Income Tax ({})", state.code),
        annual_taxable,
        state.rate,
        annualizer,
        step_number,
    )
}

/// Applies a caller-supplied local rate to annual taxable income.
///
/// A zero rate is normal and yields zero tax.
pub fn calculate_local_tax(
    annual_taxable: Decimal,
    local_tax_rate: Decimal,
    annualizer: &Annualizer,
    step_number: u32,
) -> FlatTaxResult {
    calculate_flat_tax(
        "local_tax",
        "Local Income Tax",
        annual_taxable,
        local_tax_rate,
        annualizer,
        step_number,
    )
}

fn calculate_flat_tax(
    rule_id: &str,
    rule_name: &str,
    annual_taxable: Decimal,
    rate: Decimal,
    annualizer: &Annualizer,
    step_number: u32,
) -> FlatTaxResult {
    let annual_tax = annual_taxable * rate;
    let period_tax = annualizer.to_period(annual_tax);

    let reasoning = if rate.is_zero() {
        "No rate configured, no tax due".to_string()
    } else {
        format!(
            "${} x {} / {} = ${}",
            annual_taxable.normalize(),
            rate.normalize(),
            annualizer.periods_per_year(),
            period_tax.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "annual_taxable": annual_taxable.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual_tax": annual_tax.normalize().to_string(),
            "period_tax": period_tax.normalize().to_string()
        }),
        reasoning,
    };

    FlatTaxResult {
        annual_tax,
        period_tax,
        audit_step,
    }
}
