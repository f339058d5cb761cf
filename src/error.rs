//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report: rejected pay inputs, rate-table
//! lookups that cannot be satisfied, and rate-table loading problems.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Two kinds matter to callers at calculation time:
/// [`EngineError::InvalidInput`] is recoverable and should be shown to the
/// person who entered the data, while [`EngineError::ConfigLookup`] means the
/// input boundary let through a value the rate table does not map and must be
/// treated as a programmer error. The remaining variants are raised while a
/// rate table is loaded and validated.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "hourly_rate".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'hourly_rate': must be greater than zero");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A pay input failed validation.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A lookup key reached the rate table without a mapping.
    #[error("Rate table has no '{table}' entry for '{key}'")]
    ConfigLookup {
        /// The rate-table section that was searched.
        table: String,
        /// The key that was not found.
        key: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The rate table parsed but breaks one of its invariants.
    #[error("Invalid rate table: {message}")]
    InvalidRateTable {
        /// A description of the violated invariant.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidRateTable`].
    pub fn invalid_rate_table(message: impl Into<String>) -> Self {
        Self::InvalidRateTable {
            message: message.into(),
        }
    }

    /// Returns true for errors the end user can fix by changing their input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
