//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a rate table
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    FederalConfig, PayFrequencyConfig, PayrollTaxConfig, RateTable, TaxYearMetadata,
};

/// Loads a validated [`RateTable`] from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/us_2024/
/// ├── tax_year.yaml         # Tax year, table name, flat state tax
/// ├── federal.yaml          # Bracket table and standard deductions
/// ├── payroll_taxes.yaml    # Social-security and medicare settings
/// └── pay_frequencies.yaml  # Pay periods per year
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PayFrequency;
///
/// let loader = ConfigLoader::load("./config/us_2024").unwrap();
/// let table = loader.rate_table();
/// assert_eq!(table.periods_per_year(PayFrequency::Weekly).unwrap(), 52);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rate_table: RateTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/us_2024")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The assembled table breaks an invariant (`InvalidRateTable`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/us_2024")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TaxYearMetadata>(&path.join("tax_year.yaml"))?;
        let federal = Self::load_yaml::<FederalConfig>(&path.join("federal.yaml"))?;
        let payroll = Self::load_yaml::<PayrollTaxConfig>(&path.join("payroll_taxes.yaml"))?;
        let frequencies =
            Self::load_yaml::<PayFrequencyConfig>(&path.join("pay_frequencies.yaml"))?;

        let rate_table = RateTable::new(
            metadata,
            federal.brackets,
            payroll.fica,
            federal.standard_deductions,
            frequencies.periods_per_year,
        )?;

        debug!(
            path = %path.display(),
            tax_year = rate_table.tax_year(),
            brackets = rate_table.federal_brackets().len(),
            "Loaded rate table"
        );

        Ok(Self { rate_table })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rate table.
    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }

    /// Consumes the loader, returning the rate table.
    pub fn into_rate_table(self) -> RateTable {
        self.rate_table
    }
}
