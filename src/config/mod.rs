//! Rate table configuration for the payroll engine.
//!
//! This module provides the immutable [`RateTable`] of tax-year constants and
//! the [`ConfigLoader`] that builds one from YAML files. A table is loaded
//! once and shared read-only by every calculation.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let table = ConfigLoader::load("./config/us_2024").unwrap().into_rate_table();
//! println!("Loaded tax year {}", table.tax_year());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    FederalConfig, FicaRates, PayFrequencyConfig, PayrollTaxConfig, RateTable, StateTax,
    TaxBracket, TaxYearMetadata,
};
