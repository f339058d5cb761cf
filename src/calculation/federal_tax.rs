//! Progressive federal income tax.
//!
//! Income is allocated to brackets in ascending order. Each bracket receives
//! at most its width, and the unbounded top bracket receives whatever is
//! left. Allocation stops as soon as all income has been placed, so no dollar
//! is taxed twice and brackets above the income receive nothing.
//!
//! ```text
//! income 63,400 (2024 single, after standard deduction)
//!
//!   0      - 11,000  @ 10%  11,000 -> 1,100.00
//!   11,000 - 44,725  @ 12%  33,725 -> 4,047.00
//!   44,725 - 95,375  @ 22%  18,675 -> 4,108.50
//!                                     --------
//!                                     9,255.50
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Annualizer;
use crate::config::TaxBracket;
use crate::models::AuditStep;

/// The share of income that fell into one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAllocation {
    /// Lower bound of the bracket.
    pub min: Decimal,
    /// Upper bound of the bracket, `None` for the top bracket.
    pub max: Option<Decimal>,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// Income allocated to the bracket.
    pub taxed_amount: Decimal,
    /// Tax on the allocated income.
    pub tax: Decimal,
}

/// Allocates annual taxable income across the brackets.
///
/// Only brackets that receive income are returned. Negative income is
/// treated as 0.
pub fn allocate_federal_brackets(income: Decimal, brackets: &[TaxBracket]) -> Vec<BracketAllocation> {
    let mut allocations = Vec::new();
    let mut remaining = income.max(Decimal::ZERO);

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxed_amount = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };

        allocations.push(BracketAllocation {
            min: bracket.min,
            max: bracket.max,
            rate: bracket.rate,
            taxed_amount,
            tax: taxed_amount * bracket.rate,
        });

        remaining -= taxed_amount;
    }

    allocations
}

/// Calculates the annual federal tax on `income`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_federal_tax;
/// use payroll_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let brackets = vec![
///     TaxBracket { min: dec("0"), max: Some(dec("11000")), rate: dec("0.10") },
///     TaxBracket { min: dec("11000"), max: None, rate: dec("0.12") },
/// ];
///
/// assert_eq!(calculate_federal_tax(Decimal::ZERO, &brackets), Decimal::ZERO);
/// assert_eq!(calculate_federal_tax(dec("11000"), &brackets), dec("1100"));
/// assert_eq!(calculate_federal_tax(dec("12000"), &brackets), dec("1220"));
/// ```
pub fn calculate_federal_tax(income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    allocate_federal_brackets(income, brackets)
        .iter()
        .map(|a| a.tax)
        .sum()
}

/// The rate of the highest bracket that receives income, or 0 for no income.
pub fn marginal_rate(income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    allocate_federal_brackets(income, brackets)
        .last()
        .map(|a| a.rate)
        .unwrap_or(Decimal::ZERO)
}

/// The result of the federal income tax stage.
#[derive(Debug, Clone)]
pub struct FederalTaxResult {
    /// Federal tax for the year.
    pub annual_tax: Decimal,
    /// Federal tax for one pay period.
    pub period_tax: Decimal,
    /// The per-bracket breakdown of the annual tax.
    pub allocations: Vec<BracketAllocation>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates federal income tax for one period.
pub fn calculate_federal_income_tax(
    federal_taxable_annual: Decimal,
    brackets: &[TaxBracket],
    annualizer: &Annualizer,
    step_number: u32,
) -> FederalTaxResult {
    let allocations = allocate_federal_brackets(federal_taxable_annual, brackets);
    let annual_tax: Decimal = allocations.iter().map(|a| a.tax).sum();
    let period_tax = annualizer.to_period(annual_tax);
    let top_rate = allocations.last().map(|a| a.rate).unwrap_or(Decimal::ZERO);

    let breakdown: Vec<serde_json::Value> = allocations
        .iter()
        .map(|a| {
            serde_json::json!({
                "min": a.min.normalize().to_string(),
                "max": a.max.map(|m| m.normalize().to_string()),
                "rate": a.rate.normalize().to_string(),
                "taxed_amount": a.taxed_amount.normalize().to_string(),
                "tax": a.tax.normalize().to_string()
            })
        })
        .collect();

    let reasoning = if allocations.is_empty() {
        "No federal taxable income after the standard deduction".to_string()
    } else {
        let parts: Vec<String> = allocations
            .iter()
            .map(|a| {
                format!(
                    "${} @ {}% = ${}",
                    a.taxed_amount.normalize(),
                    (a.rate * Decimal::ONE_HUNDRED).normalize(),
                    a.tax.normalize()
                )
            })
            .collect();
        format!(
            "{} -> ${} annual / {} = ${} per period",
            parts.join(" + "),
            annual_tax.normalize(),
            annualizer.periods_per_year(),
            period_tax.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "federal_income_tax".to_string(),
        rule_name: "Federal Income Tax".to_string(),
        input: serde_json::json!({
            "federal_taxable_annual": federal_taxable_annual.normalize().to_string(),
            "bracket_count": brackets.len()
        }),
        output: serde_json::json!({
            "brackets": breakdown,
            "marginal_rate": top_rate.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string(),
            "period_tax": period_tax.normalize().to_string()
        }),
        reasoning,
    };

    FederalTaxResult {
        annual_tax,
        period_tax,
        allocations,
        audit_step,
    }
}
