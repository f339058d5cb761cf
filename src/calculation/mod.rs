//! Calculation logic for the payroll engine.
//!
//! This module contains the individual calculation stages (input validation,
//! gross pay, annualization, taxable income, progressive federal tax, FICA,
//! flat state and local tax) and the [`calculate_net_pay`] pipeline that
//! chains them into a [`CalculationResult`](crate::models::CalculationResult).

mod annualization;
mod federal_tax;
mod fica;
mod flat_tax;
mod gross_pay;
mod pipeline;
mod taxable_income;
mod validation;

pub use annualization::{AnnualizedAmounts, Annualizer, annualize_amounts, to_annual, to_period};
pub use federal_tax::{
    BracketAllocation, FederalTaxResult, allocate_federal_brackets, calculate_federal_income_tax,
    calculate_federal_tax, marginal_rate,
};
pub use fica::{FicaResult, calculate_fica, social_security_wages};
pub use flat_tax::{FlatTaxResult, calculate_local_tax, calculate_state_tax};
pub use gross_pay::{GrossPayResult, OVERTIME_MULTIPLIER, calculate_gross_pay};
pub use pipeline::{NEGATIVE_NET_PAY, calculate_net_pay};
pub use taxable_income::{PRE_TAX_EXCEEDS_GROSS, TaxableIncomeResult, calculate_taxable_income};
pub use validation::{MAX_AMOUNT, MAX_HOURS, validate_pay_input};
