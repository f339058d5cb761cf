//! Calculation result models for the payroll engine.
//!
//! This module contains the [`CalculationResult`] type, the per-period net-pay
//! breakdown produced by the pipeline, along with the audit trace that records
//! how each figure was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayFrequency;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are computed correctly but probably deserve
/// a second look, such as a negative net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Finds the step produced by the given rule.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The per-period net-pay breakdown for one pay input.
///
/// Every amount is for a single pay period and is kept at full precision;
/// rounding to cents is a display concern. The totals always satisfy:
///
/// ```text
/// total_deductions = pre_tax_deductions + federal_tax + social_security
///                  + medicare + state_tax + local_tax + post_tax_deductions
/// net_pay          = gross_pay - total_deductions
/// ```
///
/// `net_pay` is not floored, so deductions larger than gross pay produce a
/// negative value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The pay frequency the amounts are expressed in.
    pub pay_frequency: PayFrequency,
    /// Earnings for the period before any deduction.
    pub gross_pay: Decimal,
    /// Pre-tax deductions for the period.
    pub pre_tax_deductions: Decimal,
    /// Income subject to FICA, state and local tax, per period.
    pub taxable_income: Decimal,
    /// Federal income tax withheld for the period.
    pub federal_tax: Decimal,
    /// Social-security tax for the period.
    pub social_security: Decimal,
    /// Medicare tax for the period.
    pub medicare: Decimal,
    /// State income tax for the period.
    pub state_tax: Decimal,
    /// Local income tax for the period.
    pub local_tax: Decimal,
    /// Post-tax deductions for the period.
    pub post_tax_deductions: Decimal,
    /// Sum of every deduction and tax above.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
    /// How each figure was reached.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Sum of the five taxes, excluding user-supplied deductions.
    pub fn total_taxes(&self) -> Decimal {
        self.federal_tax + self.social_security + self.medicare + self.state_tax + self.local_tax
    }

    /// Returns true if a local tax line applies to this result.
    pub fn has_local_tax(&self) -> bool {
        !self.local_tax.is_zero()
    }

    /// Returns true if deductions exceeded gross pay.
    pub fn is_net_pay_negative(&self) -> bool {
        self.net_pay.is_sign_negative() && !self.net_pay.is_zero()
    }
}
