//! The payroll calculation pipeline.
//!
//! [`calculate_net_pay`] drives one pay input through every stage, in order:
//!
//! 1. input validation
//! 2. gross pay for the period
//! 3. annualization of gross pay and pre-tax deductions
//! 4. taxable income (FICA/state/local base and federal base)
//! 5. federal income tax
//! 6. social security
//! 7. medicare
//! 8. state tax
//! 9. local tax
//! 10. aggregation into total deductions and net pay
//!
//! Rate-table lookups happen before any stage runs, so the pipeline either
//! returns a complete result or an error with nothing computed.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{
    Annualizer, annualize_amounts, calculate_federal_income_tax, calculate_fica,
    calculate_gross_pay, calculate_local_tax, calculate_state_tax, calculate_taxable_income,
    validate_pay_input,
};
use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, AuditWarning, CalculationResult, PayInput};

/// Warning code raised when total deductions exceed gross pay.
pub const NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// Calculates the net-pay breakdown for one pay period.
///
/// This is a pure function of `input` and `rate_table`: the same arguments
/// always produce the same result, audit trace included.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
///   if the input fails validation
/// - [`EngineError::ConfigLookup`](crate::error::EngineError::ConfigLookup)
///   if the table does not map the input's pay frequency or filing status
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_net_pay;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{FilingStatus, PayFrequency, PayInput, PayType};
/// use rust_decimal::Decimal;
///
/// let table = ConfigLoader::load("./config/us_2024").unwrap().into_rate_table();
/// let input = PayInput {
///     pay_type: PayType::Salary { annual_salary: Decimal::from(78000) },
///     pay_frequency: PayFrequency::Weekly,
///     filing_status: FilingStatus::Single,
///     pre_tax_deductions: Decimal::ZERO,
///     post_tax_deductions: Decimal::ZERO,
///     local_tax_rate: Decimal::ZERO,
/// };
///
/// let result = calculate_net_pay(&input, &table).unwrap();
/// assert_eq!(result.gross_pay, Decimal::from(1500));
/// assert_eq!(result.net_pay, result.gross_pay - result.total_deductions);
/// ```
pub fn calculate_net_pay(input: &PayInput, rate_table: &RateTable) -> EngineResult<CalculationResult> {
    let mut steps: Vec<AuditStep> = Vec::with_capacity(10);
    let mut warnings: Vec<AuditWarning> = Vec::new();

    steps.push(validate_pay_input(input, 1)?);

    let annualizer = Annualizer::new(input.pay_frequency, rate_table)?;
    let standard_deduction = rate_table.standard_deduction(input.filing_status)?;

    // Stage 1: gross pay
    let gross = calculate_gross_pay(&input.pay_type, &annualizer, 2);
    let gross_pay = gross.gross_pay;
    debug!(
        pay_type = input.pay_type.as_str(),
        gross_pay = %gross_pay,
        "Calculated gross pay"
    );
    steps.push(gross.audit_step);

    // Stage 2: annualize
    let annual = annualize_amounts(gross_pay, input.pre_tax_deductions, &annualizer, 3);
    debug!(
        annual_gross = %annual.annual_gross,
        annual_pre_tax = %annual.annual_pre_tax,
        periods_per_year = annualizer.periods_per_year(),
        "Annualized amounts"
    );
    steps.push(annual.audit_step);

    // Stages 3-4: taxable income and federal base
    let taxable = calculate_taxable_income(
        annual.annual_gross,
        annual.annual_pre_tax,
        input.filing_status,
        standard_deduction,
        4,
    );
    debug!(
        annual_taxable = %taxable.annual_taxable,
        federal_taxable_annual = %taxable.federal_taxable_annual,
        "Calculated taxable income"
    );
    steps.push(taxable.audit_step);
    warnings.extend(taxable.warning);

    let federal = calculate_federal_income_tax(
        taxable.federal_taxable_annual,
        rate_table.federal_brackets(),
        &annualizer,
        5,
    );
    debug!(
        annual_tax = %federal.annual_tax,
        period_tax = %federal.period_tax,
        brackets_used = federal.allocations.len(),
        "Calculated federal income tax"
    );
    steps.push(federal.audit_step);

    // Stage 5: FICA
    let fica = calculate_fica(taxable.annual_taxable, rate_table.fica(), &annualizer, 6);
    debug!(
        social_security = %fica.social_security,
        medicare = %fica.medicare,
        social_security_wages = %fica.social_security_wages,
        "Calculated FICA"
    );
    steps.extend(fica.audit_steps);

    // Stages 6-7: flat taxes
    let state = calculate_state_tax(taxable.annual_taxable, rate_table.state(), &annualizer, 8);
    steps.push(state.audit_step);

    let local = calculate_local_tax(
        taxable.annual_taxable,
        input.local_tax_rate,
        &annualizer,
        9,
    );
    steps.push(local.audit_step);
    debug!(
        state_tax = %state.period_tax,
        local_tax = %local.period_tax,
        "Calculated flat taxes"
    );

    // Stage 8: aggregate
    let total_deductions = input.pre_tax_deductions
        + federal.period_tax
        + fica.social_security
        + fica.medicare
        + state.period_tax
        + local.period_tax
        + input.post_tax_deductions;
    let net_pay = gross_pay - total_deductions;

    if net_pay < Decimal::ZERO {
        warn!(
            gross_pay = %gross_pay,
            total_deductions = %total_deductions,
            net_pay = %net_pay,
            "Total deductions exceed gross pay"
        );
        warnings.push(AuditWarning {
            code: NEGATIVE_NET_PAY.to_string(),
            message: format!(
                "Total deductions ${} exceed gross pay ${}",
                total_deductions.normalize(),
                gross_pay.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    steps.push(AuditStep {
        step_number: 10,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "pre_tax_deductions": input.pre_tax_deductions.normalize().to_string(),
            "federal_tax": federal.period_tax.normalize().to_string(),
            "social_security": fica.social_security.normalize().to_string(),
            "medicare": fica.medicare.normalize().to_string(),
            "state_tax": state.period_tax.normalize().to_string(),
            "local_tax": local.period_tax.normalize().to_string(),
            "post_tax_deductions": input.post_tax_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} total deductions = ${}",
            gross_pay.normalize(),
            total_deductions.normalize(),
            net_pay.normalize()
        ),
    });

    debug!(
        gross_pay = %gross_pay,
        total_deductions = %total_deductions,
        net_pay = %net_pay,
        warnings = warnings.len(),
        "Calculated net pay"
    );

    Ok(CalculationResult {
        pay_frequency: input.pay_frequency,
        gross_pay,
        pre_tax_deductions: input.pre_tax_deductions,
        taxable_income: annualizer.to_period(taxable.annual_taxable),
        federal_tax: federal.period_tax,
        social_security: fica.social_security,
        medicare: fica.medicare,
        state_tax: state.period_tax,
        local_tax: local.period_tax,
        post_tax_deductions: input.post_tax_deductions,
        total_deductions,
        net_pay,
        audit_trace: AuditTrace { steps, warnings },
    })
}
