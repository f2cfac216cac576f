//! Salary breakdown calculation for one employee and one period.
//!
//! This module turns a daily wage rate and an attendance figure into a
//! complete [`SalaryBreakdown`]: earnings, statutory deductions, net pay and
//! employer cost-to-company. Every statutory rate comes from an explicit
//! [`PayrollConfig`]; nothing is read from ambient state and no constant is
//! hardcoded here.
//!
//! # Derivation order
//!
//! Each step depends only on previously computed values. The ordering is
//! load-bearing and preserved exactly:
//!
//! | Step | Component          | Formula                                  |
//! |------|--------------------|------------------------------------------|
//! | 1    | Monthly salary     | `daily_rate × attendance_days`           |
//! | 2    | VDA                | flat configured amount                   |
//! | 3    | Paid leave         | `((daily_rate + vda) / 30) × 1.5`        |
//! | 4    | Bonus              | `(daily_rate + vda) × bonus%`            |
//! | 5    | Gross earnings     | step 1 + step 2 + step 3 + step 4        |
//! | 6    | ESI (employee)     | `gross × esi_employee%`                  |
//! | 7    | ESI (employer)     | `gross × esi_employer%`                  |
//! | 8    | PF (employee)      | `monthly_salary × pf_employee%`          |
//! | 9    | PF (employer)      | `monthly_salary × pf_employer%`          |
//! | 10   | Professional tax   | flat configured amount                   |
//! | 11   | Total deductions   | step 8 + step 6 + step 10                |
//! | 12   | Net salary         | step 5 − step 11                         |
//! | 13   | CTC                | step 5 + step 9 + step 7                 |
//!
//! PF is computed on monthly salary while ESI is computed on gross earnings.
//! The asymmetry is intentional and must not be "fixed".
//!
//! No rounding is applied anywhere in the chain; rounding to two decimal
//! places happens once, at the presentation boundary, via
//! [`SalaryBreakdown::rounded`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::SalaryCalculator;
//! use payroll_core::{EmployeeWageInput, PayrollConfig};
//!
//! let calculator = SalaryCalculator::new(PayrollConfig::default());
//! let input = EmployeeWageInput {
//!     daily_rate: dec!(500),
//!     attendance_days: dec!(26),
//! };
//!
//! let breakdown = calculator.calculate(&input).unwrap().rounded();
//!
//! assert_eq!(breakdown.monthly_salary, dec!(13000.00));
//! assert_eq!(breakdown.gross_earnings, dec!(13220.01));
//! assert_eq!(breakdown.net_salary, dec!(11360.86));
//! assert_eq!(breakdown.ctc, dec!(15339.66));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::percent_of;
use crate::models::{EmployeeWageInput, PayrollConfig, PayrollConfigError, SalaryBreakdown};

/// Errors that can occur during a salary calculation.
///
/// None of these are retryable: the caller must fix the input. The calculator
/// never clamps a bad value to zero, because a silently zeroed wage is a
/// payroll defect with no visible signal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SalaryCalculatorError {
    /// The daily wage rate is negative.
    #[error("daily rate must not be negative, got {0}")]
    NegativeDailyRate(Decimal),

    /// The attendance figure is negative.
    #[error("attendance days must not be negative, got {0}")]
    NegativeAttendanceDays(Decimal),

    /// The payroll configuration failed validation.
    #[error(transparent)]
    Config(#[from] PayrollConfigError),
}

/// Calculator for monthly salary breakdowns.
///
/// Pure and deterministic: identical inputs always produce bit-identical
/// output, so the calculator is safe to share across threads and to evaluate
/// over hundreds of employee/period combinations.
#[derive(Debug, Clone)]
pub struct SalaryCalculator {
    config: PayrollConfig,
}

impl SalaryCalculator {
    /// Creates a calculator over the given configuration snapshot.
    ///
    /// The configuration is validated on every [`calculate`](Self::calculate)
    /// call, so a calculator built from bad settings fails loudly rather than
    /// producing a partially-correct breakdown.
    pub fn new(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// The configuration this calculator was built from.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Computes the complete salary breakdown for one employee.
    ///
    /// # Errors
    ///
    /// Returns [`SalaryCalculatorError`] if the daily rate or attendance is
    /// negative, or if the configuration fails validation. A failed call
    /// produces no breakdown at all — there is no partial output.
    pub fn calculate(
        &self,
        input: &EmployeeWageInput,
    ) -> Result<SalaryBreakdown, SalaryCalculatorError> {
        self.config.validate()?;

        if input.daily_rate < Decimal::ZERO {
            return Err(SalaryCalculatorError::NegativeDailyRate(input.daily_rate));
        }
        if input.attendance_days < Decimal::ZERO {
            return Err(SalaryCalculatorError::NegativeAttendanceDays(
                input.attendance_days,
            ));
        }
        if input.attendance_days.is_zero() {
            warn!(
                daily_rate = %input.daily_rate,
                "zero attendance: base pay is zero but allowances still accrue"
            );
        }

        // Step 1: base pay earned through attendance
        let monthly_salary = self.monthly_salary(input);

        // Step 2: flat VDA, not scaled by attendance
        let vda = self.config.vda_flat_amount;

        // Steps 3-4: allowances on the daily rate
        let paid_leave = self.paid_leave(input.daily_rate);
        let bonus = self.bonus(input.daily_rate);

        // Step 5: gross earnings
        let gross_earnings = monthly_salary + vda + paid_leave + bonus;

        // Steps 6-7: ESI on gross earnings
        let esi_employee = percent_of(gross_earnings, self.config.esi_employee_percent);
        let esi_employer = percent_of(gross_earnings, self.config.esi_employer_percent);

        // Steps 8-9: PF on monthly salary, not gross
        let pf_employee = percent_of(monthly_salary, self.config.pf_employee_percent);
        let pf_employer = percent_of(monthly_salary, self.config.pf_employer_percent);

        // Step 10: flat professional tax
        let professional_tax = self.config.professional_tax;

        // Step 11: LWF is deliberately not part of this sum
        let total_deductions = pf_employee + esi_employee + professional_tax;

        // Steps 12-13
        let net_salary = gross_earnings - total_deductions;
        let ctc = gross_earnings + pf_employer + esi_employer;

        Ok(SalaryBreakdown {
            monthly_salary,
            vda,
            paid_leave,
            bonus,
            gross_earnings,
            esi_employee,
            esi_employer,
            pf_employee,
            pf_employer,
            professional_tax,
            lwf_employee: self.config.lwf_employee_contribution,
            lwf_employer: self.config.lwf_employer_contribution,
            total_deductions,
            net_salary,
            ctc,
        })
    }

    /// Step 1: `daily_rate × attendance_days`.
    fn monthly_salary(&self, input: &EmployeeWageInput) -> Decimal {
        input.daily_rate * input.attendance_days
    }

    /// Step 3: `((daily_rate + vda) / 30) × 1.5`.
    ///
    /// Accrues unconditionally; this is a fixed allowance component, not a
    /// leave-usage figure.
    fn paid_leave(&self, daily_rate: Decimal) -> Decimal {
        (daily_rate + self.config.vda_flat_amount) / Decimal::from(30) * Decimal::new(15, 1)
    }

    /// Step 4: `(daily_rate + vda) × bonus%`.
    fn bonus(&self, daily_rate: Decimal) -> Decimal {
        percent_of(
            daily_rate + self.config.vda_flat_amount,
            self.config.bonus_percent,
        )
    }
}
