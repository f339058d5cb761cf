//! Social-security and medicare (FICA) taxes.
//!
//! Social-security tax applies only to wages up to the annual wage base.
//! Medicare applies to all taxable income.

use rust_decimal::Decimal;

use super::Annualizer;
use crate::config::FicaRates;
use crate::models::AuditStep;

/// Annual wages subject to social-security tax.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::social_security_wages;
/// use rust_decimal::Decimal;
///
/// let wage_base = Decimal::from(160200);
/// assert_eq!(social_security_wages(Decimal::from(200000), wage_base), wage_base);
/// assert_eq!(social_security_wages(Decimal::from(78000), wage_base), Decimal::from(78000));
/// ```
pub fn social_security_wages(annual_taxable: Decimal, wage_base: Decimal) -> Decimal {
    annual_taxable.min(wage_base)
}

/// The result of the FICA stage.
#[derive(Debug, Clone)]
pub struct FicaResult {
    /// Annual wages the social-security rate was applied to.
    pub social_security_wages: Decimal,
    /// Social-security tax for one period.
    pub social_security: Decimal,
    /// Medicare tax for one period.
    pub medicare: Decimal,
    /// Audit steps for social security, then medicare.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates social-security and medicare tax for one period.
///
/// # Arguments
///
/// * `annual_taxable` - Annual income after pre-tax deductions
/// * `rates` - FICA rates and the social-security wage base
/// * `annualizer` - Converts annual tax to the pay period
/// * `step_number_start` - The first of the two step numbers this stage uses
pub fn calculate_fica(
    annual_taxable: Decimal,
    rates: &FicaRates,
    annualizer: &Annualizer,
    step_number_start: u32,
) -> FicaResult {
    let ss_wages = social_security_wages(annual_taxable, rates.social_security_wage_base);
    let ss_annual = ss_wages * rates.social_security_rate;
    let social_security = annualizer.to_period(ss_annual);
    let capped = annual_taxable > rates.social_security_wage_base;

    let ss_step = AuditStep {
        step_number: step_number_start,
        rule_id: "social_security".to_string(),
        rule_name: "Social Security".to_string(),
        input: serde_json::json!({
            "annual_taxable": annual_taxable.normalize().to_string(),
            "wage_base": rates.social_security_wage_base.normalize().to_string(),
            "rate": rates.social_security_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "social_security_wages": ss_wages.normalize().to_string(),
            "wage_base_applied": capped,
            "annual_tax": ss_annual.normalize().to_string(),
            "period_tax": social_security.normalize().to_string()
        }),
        reasoning: if capped {
            format!(
                "Wages capped at wage base ${}: ${} x {} / {} = ${}",
                rates.social_security_wage_base.normalize(),
                ss_wages.normalize(),
                rates.social_security_rate.normalize(),
                annualizer.periods_per_year(),
                social_security.normalize()
            )
        } else {
            format!(
                "${} x {} / {} = ${}",
                ss_wages.normalize(),
                rates.social_security_rate.normalize(),
                annualizer.periods_per_year(),
                social_security.normalize()
            )
        },
    };

    let medicare_annual = annual_taxable * rates.medicare_rate;
    let medicare = annualizer.to_period(medicare_annual);

    let medicare_step = AuditStep {
        step_number: step_number_start + 1,
        rule_id: "medicare".to_string(),
        rule_name: "Medicare".to_string(),
        input: serde_json::json!({
            "annual_taxable": annual_taxable.normalize().to_string(),
            "rate": rates.medicare_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual_tax": medicare_annual.normalize().to_string(),
            "period_tax": medicare.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} / {} = ${} (no wage cap)",
            annual_taxable.normalize(),
            rates.medicare_rate.normalize(),
            annualizer.periods_per_year(),
            medicare.normalize()
        ),
    };

    FicaResult {
        social_security_wages: ss_wages,
        social_security,
        medicare,
        audit_steps: vec![ss_step, medicare_step],
    }
}
