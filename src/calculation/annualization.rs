//! Conversion between per-period and annual amounts.
//!
//! Taxes are computed on annual figures and reported per period. An
//! [`Annualizer`] binds a pay frequency to its periods-per-year multiplier so
//! every stage of one calculation converts with the same factor.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayFrequency};

/// Scales a per-period amount up to a year.
pub fn to_annual(amount: Decimal, periods_per_year: u32) -> Decimal {
    amount * Decimal::from(periods_per_year)
}

/// Scales an annual amount down to one period.
///
/// `periods_per_year` must be positive; [`Annualizer::new`] guarantees this
/// for every multiplier it hands out.
pub fn to_period(annual_amount: Decimal, periods_per_year: u32) -> Decimal {
    annual_amount / Decimal::from(periods_per_year)
}

/// A pay frequency resolved against a rate table.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::Annualizer;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PayFrequency;
/// use rust_decimal::Decimal;
///
/// let table = ConfigLoader::load("./config/us_2024").unwrap().into_rate_table();
/// let weekly = Annualizer::new(PayFrequency::Weekly, &table).unwrap();
///
/// assert_eq!(weekly.to_annual(Decimal::from(1500)), Decimal::from(78000));
/// assert_eq!(weekly.to_period(Decimal::from(78000)), Decimal::from(1500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annualizer {
    frequency: PayFrequency,
    periods_per_year: u32,
}

impl Annualizer {
    /// Looks up the multiplier for `frequency`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigLookup`] if the table has no entry for the frequency
    /// - [`EngineError::InvalidRateTable`] if the entry is zero
    pub fn new(frequency: PayFrequency, rate_table: &RateTable) -> EngineResult<Self> {
        let periods_per_year = rate_table.periods_per_year(frequency)?;
        Self::with_periods(frequency, periods_per_year)
    }

    /// Builds an annualizer from an explicit multiplier.
    pub fn with_periods(frequency: PayFrequency, periods_per_year: u32) -> EngineResult<Self> {
        if periods_per_year == 0 {
            return Err(EngineError::invalid_rate_table(format!(
                "pay frequency '{}' has a zero periods-per-year multiplier",
                frequency
            )));
        }
        Ok(Self {
            frequency,
            periods_per_year,
        })
    }

    /// The pay frequency being converted.
    pub fn frequency(&self) -> PayFrequency {
        self.frequency
    }

    /// The number of pay periods in a year.
    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Converts a per-period amount to its annual equivalent.
    pub fn to_annual(&self, amount: Decimal) -> Decimal {
        to_annual(amount, self.periods_per_year)
    }

    /// Converts an annual amount to its per-period equivalent.
    pub fn to_period(&self, annual_amount: Decimal) -> Decimal {
        to_period(annual_amount, self.periods_per_year)
    }
}

/// Per-period gross pay and pre-tax deductions scaled to a year.
#[derive(Debug, Clone)]
pub struct AnnualizedAmounts {
    /// Gross pay for the year.
    pub annual_gross: Decimal,
    /// Pre-tax deductions for the year.
    pub annual_pre_tax: Decimal,
    /// The audit step recording the conversion.
    pub audit_step: AuditStep,
}

/// Annualizes gross pay and pre-tax deductions for one period.
pub fn annualize_amounts(
    gross_pay: Decimal,
    pre_tax_deductions: Decimal,
    annualizer: &Annualizer,
    step_number: u32,
) -> AnnualizedAmounts {
    let annual_gross = annualizer.to_annual(gross_pay);
    let annual_pre_tax = annualizer.to_annual(pre_tax_deductions);

    let audit_step = AuditStep {
        step_number,
        rule_id: "annualization".to_string(),
        rule_name: "Annualization".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "pre_tax_deductions": pre_tax_deductions.normalize().to_string(),
            "pay_frequency": annualizer.frequency().as_str(),
            "periods_per_year": annualizer.periods_per_year()
        }),
        output: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string(),
            "annual_pre_tax": annual_pre_tax.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} = ${} gross; ${} x {} = ${} pre-tax",
            gross_pay.normalize(),
            annualizer.periods_per_year(),
            annual_gross.normalize(),
            pre_tax_deductions.normalize(),
            annualizer.periods_per_year(),
            annual_pre_tax.normalize()
        ),
    };

    AnnualizedAmounts {
        annual_gross,
        annual_pre_tax,
        audit_step,
    }
}
