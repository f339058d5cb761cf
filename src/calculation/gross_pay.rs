//! Gross pay calculation.
//!
//! Hourly employees earn their rate for regular hours and time-and-a-half for
//! overtime hours. Salaried employees earn an even share of the annual salary
//! each pay period.

use rust_decimal::Decimal;

use super::Annualizer;
use crate::models::{AuditStep, PayType};

/// The overtime rate multiplier (time-and-a-half).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The result of a gross pay calculation.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Earnings for the period before any deduction.
    pub gross_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates gross pay for one period.
///
/// # Arguments
///
/// * `pay_type` - Hourly or salaried earnings, already validated
/// * `annualizer` - Converts an annual salary to the pay period
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{Annualizer, calculate_gross_pay};
/// use payroll_engine::models::{PayFrequency, PayType};
/// use rust_decimal::Decimal;
///
/// let weekly = Annualizer::with_periods(PayFrequency::Weekly, 52).unwrap();
/// let pay_type = PayType::Hourly {
///     hourly_rate: Decimal::from(20),
///     regular_hours: Decimal::from(40),
///     overtime_hours: Decimal::from(5),
/// };
///
/// let result = calculate_gross_pay(&pay_type, &weekly, 2);
/// assert_eq!(result.gross_pay, Decimal::from(950));
/// ```
pub fn calculate_gross_pay(
    pay_type: &PayType,
    annualizer: &Annualizer,
    step_number: u32,
) -> GrossPayResult {
    match pay_type {
        PayType::Hourly {
            hourly_rate,
            regular_hours,
            overtime_hours,
        } => {
            let regular_pay = *regular_hours * *hourly_rate;
            let overtime_rate = *hourly_rate * OVERTIME_MULTIPLIER;
            let overtime_pay = *overtime_hours * overtime_rate;
            let gross_pay = regular_pay + overtime_pay;

            let audit_step = AuditStep {
                step_number,
                rule_id: "gross_pay".to_string(),
                rule_name: "Gross Pay".to_string(),
                input: serde_json::json!({
                    "pay_type": "hourly",
                    "hourly_rate": hourly_rate.normalize().to_string(),
                    "regular_hours": regular_hours.normalize().to_string(),
                    "overtime_hours": overtime_hours.normalize().to_string()
                }),
                output: serde_json::json!({
                    "regular_pay": regular_pay.normalize().to_string(),
                    "overtime_rate": overtime_rate.normalize().to_string(),
                    "overtime_pay": overtime_pay.normalize().to_string(),
                    "gross_pay": gross_pay.normalize().to_string()
                }),
                reasoning: format!(
                    "{} hours x ${} + {} overtime hours x ${} ({} x {}) = ${}",
                    regular_hours.normalize(),
                    hourly_rate.normalize(),
                    overtime_hours.normalize(),
                    overtime_rate.normalize(),
                    hourly_rate.normalize(),
                    OVERTIME_MULTIPLIER,
                    gross_pay.normalize()
                ),
            };

            GrossPayResult {
                gross_pay,
                audit_step,
            }
        }
        PayType::Salary { annual_salary } => {
            let gross_pay = annualizer.to_period(*annual_salary);

            let audit_step = AuditStep {
                step_number,
                rule_id: "gross_pay".to_string(),
                rule_name: "Gross Pay".to_string(),
                input: serde_json::json!({
                    "pay_type": "salary",
                    "annual_salary": annual_salary.normalize().to_string(),
                    "pay_frequency": annualizer.frequency().as_str(),
                    "periods_per_year": annualizer.periods_per_year()
                }),
                output: serde_json::json!({
                    "gross_pay": gross_pay.normalize().to_string()
                }),
                reasoning: format!(
                    "${} / {} periods = ${}",
                    annual_salary.normalize(),
                    annualizer.periods_per_year(),
                    gross_pay.normalize()
                ),
            };

            GrossPayResult {
                gross_pay,
                audit_step,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayFrequency;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn weekly() -> Annualizer {
        Annualizer::with_periods(PayFrequency::Weekly, 52).unwrap()
    }

    fn hourly(rate: &str, regular: &str, overtime: &str) -> PayType {
        PayType::Hourly {
            hourly_rate: dec(rate),
            regular_hours: dec(regular),
            overtime_hours: dec(overtime),
        }
    }

    #[test]
    fn test_overtime_multiplier_is_exactly_1_5() {
        assert_eq!(OVERTIME_MULTIPLIER, dec("1.5"));
    }

    #[test]
    fn test_hourly_with_overtime() {
        let result = calculate_gross_pay(&hourly("20", "40", "5"), &weekly(), 2);

        assert_eq!(result.gross_pay, dec("950.00"));
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "gross_pay");
        assert_eq!(result.audit_step.output["regular_pay"], "800");
        assert_eq!(result.audit_step.output["overtime_rate"], "30");
        assert_eq!(result.audit_step.output["overtime_pay"], "150");
    }

    #[test]
    fn test_hourly_without_overtime() {
        let result = calculate_gross_pay(&hourly("28.54", "38", "0"), &weekly(), 2);
        assert_eq!(result.gross_pay, dec("1084.52"));
        assert_eq!(result.audit_step.output["overtime_pay"], "0");
    }

    #[test]
    fn test_hourly_zero_hours_is_zero_gross() {
        let result = calculate_gross_pay(&hourly("20", "0", "0"), &weekly(), 2);
        assert_eq!(result.gross_pay, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_overtime_hours() {
        let result = calculate_gross_pay(&hourly("25", "38", "1.5"), &weekly(), 2);
        // 38 x 25 + 1.5 x 37.5
        assert_eq!(result.gross_pay, dec("1006.25"));
    }

    #[test]
    fn test_salary_spread_over_periods() {
        let pay_type = PayType::Salary {
            annual_salary: dec("78000"),
        };
        let result = calculate_gross_pay(&pay_type, &weekly(), 2);

        assert_eq!(result.gross_pay, dec("1500"));
        assert_eq!(result.audit_step.input["pay_type"], "salary");
        assert_eq!(result.audit_step.input["periods_per_year"], 52);
        assert!(result.audit_step.reasoning.contains("$78000 / 52 periods = $1500"));
    }

    #[test]
    fn test_salary_monthly() {
        let monthly = Annualizer::with_periods(PayFrequency::Monthly, 12).unwrap();
        let pay_type = PayType::Salary {
            annual_salary: dec("60000"),
        };
        assert_eq!(calculate_gross_pay(&pay_type, &monthly, 2).gross_pay, dec("5000"));
    }

    #[test]
    fn test_hourly_ignores_frequency() {
        let annually = Annualizer::with_periods(PayFrequency::Annually, 1).unwrap();
        let result = calculate_gross_pay(&hourly("20", "40", "5"), &annually, 2);
        assert_eq!(result.gross_pay, dec("950"));
    }
}
