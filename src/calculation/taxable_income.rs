//! Taxable income calculation.
//!
//! Two bases come out of this stage: the annual taxable income used for FICA,
//! state and local tax (gross less pre-tax deductions), and the federal base,
//! which additionally subtracts the standard deduction. Both are floored at 0.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AuditStep, AuditWarning, FilingStatus};

/// Warning code raised when pre-tax deductions exceed gross pay.
pub const PRE_TAX_EXCEEDS_GROSS: &str = "PRE_TAX_EXCEEDS_GROSS";

/// The result of the taxable income calculation.
#[derive(Debug, Clone)]
pub struct TaxableIncomeResult {
    /// Annual income subject to FICA, state and local tax.
    pub annual_taxable: Decimal,
    /// Annual income subject to federal bracket tax.
    pub federal_taxable_annual: Decimal,
    /// The standard deduction that was subtracted.
    pub standard_deduction: Decimal,
    /// Raised when pre-tax deductions clamp taxable income to 0.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the annual taxable bases.
///
/// ```text
/// annual_taxable         = max(0, annual_gross - annual_pre_tax)
/// federal_taxable_annual = max(0, annual_taxable - standard_deduction)
/// ```
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_taxable_income;
/// use payroll_engine::models::FilingStatus;
/// use rust_decimal::Decimal;
///
/// let result = calculate_taxable_income(
///     Decimal::from(78000),
///     Decimal::ZERO,
///     FilingStatus::Single,
///     Decimal::from(14600),
///     4,
/// );
/// assert_eq!(result.annual_taxable, Decimal::from(78000));
/// assert_eq!(result.federal_taxable_annual, Decimal::from(63400));
/// ```
pub fn calculate_taxable_income(
    annual_gross: Decimal,
    annual_pre_tax: Decimal,
    filing_status: FilingStatus,
    standard_deduction: Decimal,
    step_number: u32,
) -> TaxableIncomeResult {
    let annual_taxable = (annual_gross - annual_pre_tax).max(Decimal::ZERO);
    let federal_taxable_annual = (annual_taxable - standard_deduction).max(Decimal::ZERO);

    let warning = if annual_pre_tax > annual_gross {
        warn!(
            annual_gross = %annual_gross,
            annual_pre_tax = %annual_pre_tax,
            "Pre-tax deductions exceed gross pay; taxable income set to 0"
        );
        Some(AuditWarning {
            code: PRE_TAX_EXCEEDS_GROSS.to_string(),
            message: format!(
                "Annual pre-tax deductions ${} exceed annual gross pay ${}; taxable income set to $0",
                annual_pre_tax.normalize(),
                annual_gross.normalize()
            ),
            severity: "medium".to_string(),
        })
    } else {
        None
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string(),
            "annual_pre_tax": annual_pre_tax.normalize().to_string(),
            "filing_status": filing_status.as_str(),
            "standard_deduction": standard_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual_taxable": annual_taxable.normalize().to_string(),
            "federal_taxable_annual": federal_taxable_annual.normalize().to_string()
        }),
        reasoning: format!(
            "max(0, ${} - ${}) = ${}; federal base max(0, ${} - ${} {} standard deduction) = ${}",
            annual_gross.normalize(),
            annual_pre_tax.normalize(),
            annual_taxable.normalize(),
            annual_taxable.normalize(),
            standard_deduction.normalize(),
            filing_status,
            federal_taxable_annual.normalize()
        ),
    };

    TaxableIncomeResult {
        annual_taxable,
        federal_taxable_annual,
        standard_deduction,
        warning,
        audit_step,
    }
}
