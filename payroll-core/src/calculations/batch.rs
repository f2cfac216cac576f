//! Batch payroll runs over a period's attendance.
//!
//! A payroll run evaluates the salary calculator once per attendance entry.
//! Each employee's computation is independent; a bad row is reported with its
//! employee id and excluded from totals, and the rest of the batch still
//! completes. A run of 500 employees with one bad row must neither abort nor
//! silently drop that employee's pay from the sums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::salary::{SalaryCalculator, SalaryCalculatorError};
use crate::models::{AttendanceEntry, PayrollConfig, SalaryBreakdown};

/// A successfully computed breakdown, tagged with the employee it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayslip {
    pub employee_id: String,
    pub breakdown: SalaryBreakdown,
}

/// A calculation failure for one employee, preserved for attribution.
#[derive(Debug, PartialEq, Eq)]
pub struct PayslipError {
    pub employee_id: String,
    pub error: SalaryCalculatorError,
}

/// The outcome of a payroll run: every entry lands in exactly one list.
#[derive(Debug, Default)]
pub struct PayrollRunReport {
    pub payslips: Vec<EmployeePayslip>,
    pub errors: Vec<PayslipError>,
}

impl PayrollRunReport {
    /// Number of employees with a computed payslip.
    pub fn employee_count(&self) -> usize {
        self.payslips.len()
    }

    /// Sum of net salaries across computed payslips.
    pub fn total_net_salary(&self) -> Decimal {
        self.payslips
            .iter()
            .map(|p| p.breakdown.net_salary)
            .sum()
    }

    /// The breakdowns alone, for aggregation.
    pub fn breakdowns(&self) -> Vec<SalaryBreakdown> {
        self.payslips.iter().map(|p| p.breakdown.clone()).collect()
    }
}

/// Runs payroll for every attendance entry under one configuration snapshot.
///
/// Failures are collected, not propagated: callers get both the computed
/// payslips and a per-employee error list, so a report view can show which
/// row failed and why instead of a bare "calculation failed".
pub fn run_payroll(entries: &[AttendanceEntry], config: &PayrollConfig) -> PayrollRunReport {
    let calculator = SalaryCalculator::new(config.clone());
    let mut report = PayrollRunReport::default();

    for entry in entries {
        match calculator.calculate(&entry.wage_input()) {
            Ok(breakdown) => report.payslips.push(EmployeePayslip {
                employee_id: entry.employee_id.clone(),
                breakdown,
            }),
            Err(error) => {
                warn!(
                    employee_id = %entry.employee_id,
                    %error,
                    "payroll calculation failed for employee; excluded from totals"
                );
                report.errors.push(PayslipError {
                    employee_id: entry.employee_id.clone(),
                    error,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::PayPeriod;

    fn entry(employee_id: &str, daily_rate: Decimal, attendance_days: Decimal) -> AttendanceEntry {
        AttendanceEntry {
            employee_id: employee_id.to_string(),
            period: PayPeriod::new(2025, 3).unwrap(),
            daily_rate,
            attendance_days,
        }
    }

    #[test]
    fn computes_a_payslip_per_valid_entry() {
        let entries = vec![
            entry("EMP001", dec!(500), dec!(26)),
            entry("EMP002", dec!(450), dec!(24)),
        ];

        let report = run_payroll(&entries, &PayrollConfig::default());

        assert_eq!(report.employee_count(), 2);
        assert_eq!(report.errors, vec![]);
        assert_eq!(report.payslips[0].employee_id, "EMP001");
        assert_eq!(
            report.payslips[0].breakdown.monthly_salary,
            dec!(13000)
        );
    }

    #[test]
    fn bad_row_is_reported_and_excluded_without_aborting_the_batch() {
        let entries = vec![
            entry("EMP001", dec!(500), dec!(26)),
            entry("EMP002", dec!(-450), dec!(24)),
            entry("EMP003", dec!(600), dec!(25)),
        ];

        let report = run_payroll(&entries, &PayrollConfig::default());

        assert_eq!(report.employee_count(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].employee_id, "EMP002");
        assert_eq!(
            report.errors[0].error,
            SalaryCalculatorError::NegativeDailyRate(dec!(-450))
        );
    }

    #[test]
    fn totals_cover_only_computed_payslips() {
        let entries = vec![
            entry("EMP001", dec!(500), dec!(26)),
            entry("EMP002", dec!(500), dec!(-1)),
            entry("EMP003", dec!(500), dec!(26)),
        ];

        let report = run_payroll(&entries, &PayrollConfig::default());

        let single = run_payroll(
            &[entry("EMP001", dec!(500), dec!(26))],
            &PayrollConfig::default(),
        );
        assert_eq!(
            report.total_net_salary(),
            single.total_net_salary() * dec!(2)
        );
    }

    #[test]
    fn empty_batch_yields_empty_report() {
        let report = run_payroll(&[], &PayrollConfig::default());

        assert_eq!(report.employee_count(), 0);
        assert_eq!(report.total_net_salary(), dec!(0));
        assert_eq!(report.errors, vec![]);
    }
}
