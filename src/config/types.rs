//! Rate table types.
//!
//! This module contains the strongly-typed rate-table structures that are
//! deserialized from YAML configuration files, and the validated
//! [`RateTable`] the calculation pipeline reads from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{FilingStatus, PayFrequency};

/// Flat state income tax settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTax {
    /// The state name (e.g., "Pennsylvania").
    pub name: String,
    /// The postal code of the state (e.g., "PA").
    pub code: String,
    /// The flat rate applied to taxable income.
    pub rate: Decimal,
}

/// Metadata about the tax year a rate table describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearMetadata {
    /// The calendar tax year (e.g., 2024).
    pub tax_year: i32,
    /// A human-readable name for the table.
    pub name: String,
    /// The state whose flat income tax applies.
    pub state: StateTax,
}

/// One bracket of the progressive federal income tax.
///
/// `max` is `None` for the top bracket, whose width is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of taxable income for this bracket.
    pub min: Decimal,
    /// Upper bound of taxable income for this bracket, if any.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Marginal rate applied to income inside the bracket.
    pub rate: Decimal,
}

impl TaxBracket {
    /// The amount of income the bracket spans, or `None` if unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max.map(|max| max - self.min)
    }
}

/// Federal configuration file structure (federal.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct FederalConfig {
    /// Progressive brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
    /// Standard deduction by filing status.
    pub standard_deductions: HashMap<FilingStatus, Decimal>,
}

/// Social-security and medicare settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaRates {
    /// Employee social-security rate.
    pub social_security_rate: Decimal,
    /// Annual wages above which social-security tax stops accruing.
    pub social_security_wage_base: Decimal,
    /// Employee medicare rate, applied without a wage cap.
    pub medicare_rate: Decimal,
}

/// Payroll tax configuration file structure (payroll_taxes.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollTaxConfig {
    /// FICA rates and wage base.
    pub fica: FicaRates,
}

/// Pay frequency configuration file structure (pay_frequencies.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct PayFrequencyConfig {
    /// Number of pay periods per year for each frequency.
    pub periods_per_year: HashMap<PayFrequency, u32>,
}

/// The immutable set of tax-year constants used by every calculation.
///
/// A `RateTable` can only be built through [`RateTable::new`], which checks
/// the bracket invariants and that every [`PayFrequency`] and
/// [`FilingStatus`] is mapped. Lookups still return [`EngineResult`] so that
/// a missing key surfaces as [`EngineError::ConfigLookup`] rather than a
/// fabricated default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    /// Tax year and state metadata.
    metadata: TaxYearMetadata,
    /// Federal brackets, ascending and contiguous.
    federal_brackets: Vec<TaxBracket>,
    /// FICA settings.
    fica: FicaRates,
    /// Standard deduction by filing status.
    standard_deductions: HashMap<FilingStatus, Decimal>,
    /// Pay periods per year by frequency.
    periods_per_year: HashMap<PayFrequency, u32>,
}

impl RateTable {
    /// Builds a rate table, rejecting any violated invariant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRateTable`] if:
    /// - there are no brackets, the first does not start at 0, or the last is bounded
    /// - brackets are not contiguous (`brackets[i].max != brackets[i + 1].min`)
    /// - a bracket is empty or inverted, or an inner bracket is unbounded
    /// - any rate lies outside `[0, 1]`
    /// - the social-security wage base is not positive
    /// - a standard deduction is negative
    /// - a pay frequency maps to zero periods per year
    /// - a frequency or filing status has no entry
    pub fn new(
        metadata: TaxYearMetadata,
        federal_brackets: Vec<TaxBracket>,
        fica: FicaRates,
        standard_deductions: HashMap<FilingStatus, Decimal>,
        periods_per_year: HashMap<PayFrequency, u32>,
    ) -> EngineResult<Self> {
        validate_brackets(&federal_brackets)?;
        validate_rate("fica.social_security_rate", fica.social_security_rate)?;
        validate_rate("fica.medicare_rate", fica.medicare_rate)?;
        validate_rate("state.rate", metadata.state.rate)?;

        if fica.social_security_wage_base <= Decimal::ZERO {
            return Err(EngineError::invalid_rate_table(format!(
                "social security wage base must be positive, got {}",
                fica.social_security_wage_base
            )));
        }

        for status in FilingStatus::ALL {
            match standard_deductions.get(&status) {
                None => {
                    return Err(EngineError::invalid_rate_table(format!(
                        "no standard deduction for filing status '{}'",
                        status
                    )));
                }
                Some(amount) if *amount < Decimal::ZERO => {
                    return Err(EngineError::invalid_rate_table(format!(
                        "standard deduction for '{}' must not be negative, got {}",
                        status, amount
                    )));
                }
                Some(_) => {}
            }
        }

        for frequency in PayFrequency::ALL {
            match periods_per_year.get(&frequency) {
                None => {
                    return Err(EngineError::invalid_rate_table(format!(
                        "no periods-per-year entry for pay frequency '{}'",
                        frequency
                    )));
                }
                Some(0) => {
                    return Err(EngineError::invalid_rate_table(format!(
                        "pay frequency '{}' must have at least one period per year",
                        frequency
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            metadata,
            federal_brackets,
            fica,
            standard_deductions,
            periods_per_year,
        })
    }

    /// Returns the tax year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns the tax year this table describes.
    pub fn tax_year(&self) -> i32 {
        self.metadata.tax_year
    }

    /// Returns the federal brackets in ascending order.
    pub fn federal_brackets(&self) -> &[TaxBracket] {
        &self.federal_brackets
    }

    /// Returns the FICA settings.
    pub fn fica(&self) -> &FicaRates {
        &self.fica
    }

    /// Returns the flat state settings.
    pub fn state(&self) -> &StateTax {
        &self.metadata.state
    }

    /// Returns the standard deduction for a filing status.
    pub fn standard_deduction(&self, filing_status: FilingStatus) -> EngineResult<Decimal> {
        self.standard_deductions
            .get(&filing_status)
            .copied()
            .ok_or_else(|| EngineError::ConfigLookup {
                table: "standard_deductions".to_string(),
                key: filing_status.to_string(),
            })
    }

    /// Returns the number of pay periods per year for a frequency.
    pub fn periods_per_year(&self, frequency: PayFrequency) -> EngineResult<u32> {
        self.periods_per_year
            .get(&frequency)
            .copied()
            .ok_or_else(|| EngineError::ConfigLookup {
                table: "pay_frequencies".to_string(),
                key: frequency.to_string(),
            })
    }
}

fn validate_rate(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::invalid_rate_table(format!(
            "{} must be between 0 and 1, got {}",
            name, rate
        )));
    }
    Ok(())
}

fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let first = brackets
        .first()
        .ok_or_else(|| EngineError::invalid_rate_table("no federal brackets"))?;

    if !first.min.is_zero() {
        return Err(EngineError::invalid_rate_table(format!(
            "first bracket must start at 0, got {}",
            first.min
        )));
    }

    for (i, bracket) in brackets.iter().enumerate() {
        validate_rate(&format!("brackets[{}].rate", i), bracket.rate)?;

        let is_last = i + 1 == brackets.len();
        match (bracket.max, is_last) {
            (None, true) => {}
            (None, false) => {
                return Err(EngineError::invalid_rate_table(format!(
                    "only the last bracket may be unbounded, brackets[{}] is",
                    i
                )));
            }
            (Some(_), true) => {
                return Err(EngineError::invalid_rate_table(
                    "last bracket must be unbounded",
                ));
            }
            (Some(max), false) => {
                if max <= bracket.min {
                    return Err(EngineError::invalid_rate_table(format!(
                        "brackets[{}] max {} must exceed min {}",
                        i, max, bracket.min
                    )));
                }
                let next_min = brackets[i + 1].min;
                if max != next_min {
                    return Err(EngineError::invalid_rate_table(format!(
                        "brackets are not contiguous: brackets[{}].max {} != brackets[{}].min {}",
                        i,
                        max,
                        i + 1,
                        next_min
                    )));
                }
            }
        }
    }

    Ok(())
}
