//! Payroll net-pay engine
//!
//! This crate computes per-period net pay for US employees: gross pay from
//! hourly or salaried earnings, progressive federal income tax, FICA, and
//! flat state and local tax, all driven by a tax-year rate table loaded from
//! YAML. Every result carries an audit trace of how each figure was reached.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

/// The version of the engine, reported with every calculation.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
