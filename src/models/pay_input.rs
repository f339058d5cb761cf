//! Pay input model and its enumerated keys.
//!
//! This module defines [`PayInput`], the per-invocation description of one pay
//! period, along with the closed [`PayFrequency`] and [`FilingStatus`] enums
//! used to key the rate table.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often the employee is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayFrequency {
    /// 52 pay periods a year.
    Weekly,
    /// 26 pay periods a year.
    Biweekly,
    /// 24 pay periods a year.
    SemiMonthly,
    /// 12 pay periods a year.
    Monthly,
    /// A single pay period covering the whole year.
    Annually,
}

impl PayFrequency {
    /// Every pay frequency, in order of increasing period length.
    pub const ALL: [PayFrequency; 5] = [
        PayFrequency::Weekly,
        PayFrequency::Biweekly,
        PayFrequency::SemiMonthly,
        PayFrequency::Monthly,
        PayFrequency::Annually,
    ];

    /// The key used for this frequency in configuration and requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::SemiMonthly => "semi-monthly",
            Self::Monthly => "monthly",
            Self::Annually => "annually",
        }
    }

    /// Parses a configuration/request key back into a frequency.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// The label shown next to per-period amounts.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayFrequency;
    ///
    /// assert_eq!(PayFrequency::Weekly.period_label(), "per week");
    /// assert_eq!(PayFrequency::Biweekly.period_label(), "per paycheck (biweekly)");
    /// ```
    pub fn period_label(&self) -> &'static str {
        match self {
            Self::Weekly => "per week",
            Self::Biweekly => "per paycheck (biweekly)",
            Self::SemiMonthly => "per paycheck (semi-monthly)",
            Self::Monthly => "per month",
            Self::Annually => "per year",
        }
    }
}

impl fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Federal filing status, which selects the standard deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    Single,
    /// Married filing jointly.
    Married,
}

impl FilingStatus {
    /// Every filing status.
    pub const ALL: [FilingStatus; 2] = [FilingStatus::Single, FilingStatus::Married];

    /// The key used for this status in configuration and requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
        }
    }

    /// Parses a configuration/request key back into a filing status.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How gross pay for the period is earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayType {
    /// Paid by the hour, with overtime hours at time-and-a-half.
    Hourly {
        /// Pay per regular hour.
        hourly_rate: Decimal,
        /// Regular hours worked in the period.
        regular_hours: Decimal,
        /// Overtime hours worked in the period.
        #[serde(default)]
        overtime_hours: Decimal,
    },
    /// Paid a fixed annual salary spread evenly across pay periods.
    Salary {
        /// Gross salary for the year.
        annual_salary: Decimal,
    },
}

impl PayType {
    /// The key used for this pay type in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly { .. } => "hourly",
            Self::Salary { .. } => "salary",
        }
    }
}

/// Everything needed to compute net pay for one pay period.
///
/// Deduction amounts are per period. `local_tax_rate` is a fraction
/// (0.01 for 1%), never a percentage.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{FilingStatus, PayFrequency, PayInput, PayType};
/// use rust_decimal::Decimal;
///
/// let input = PayInput {
///     pay_type: PayType::Salary { annual_salary: Decimal::from(78000) },
///     pay_frequency: PayFrequency::Weekly,
///     filing_status: FilingStatus::Single,
///     pre_tax_deductions: Decimal::ZERO,
///     post_tax_deductions: Decimal::ZERO,
///     local_tax_rate: Decimal::ZERO,
/// };
/// assert!(!input.is_hourly());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInput {
    /// Hourly or salaried earnings.
    pub pay_type: PayType,
    /// How often the employee is paid.
    pub pay_frequency: PayFrequency,
    /// Federal filing status.
    pub filing_status: FilingStatus,
    /// Pre-tax deductions per period (401(k), HSA, ...).
    #[serde(default)]
    pub pre_tax_deductions: Decimal,
    /// Post-tax deductions per period (Roth, garnishments, ...).
    #[serde(default)]
    pub post_tax_deductions: Decimal,
    /// Local income tax rate as a fraction; zero when there is none.
    #[serde(default)]
    pub local_tax_rate: Decimal,
}

impl PayInput {
    /// Returns true if the employee is paid by the hour.
    pub fn is_hourly(&self) -> bool {
        matches!(self.pay_type, PayType::Hourly { .. })
    }
}
