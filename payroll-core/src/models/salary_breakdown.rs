use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// One employee's complete salary breakdown for one period.
///
/// A breakdown is a derived projection: it is recomputed whenever attendance,
/// the daily rate, or the payroll configuration changes, and any stored copy
/// (dashboard cache, report row) must never be treated as a source of truth.
///
/// All fields carry full precision. Nothing is rounded during derivation;
/// call [`SalaryBreakdown::rounded`] at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Base pay: `daily_rate × attendance_days`.
    pub monthly_salary: Decimal,

    /// Variable Dearness Allowance, flat per period (not scaled by attendance).
    pub vda: Decimal,

    /// Paid-leave allowance: `((daily_rate + vda) / 30) × 1.5`.
    ///
    /// Accrues every period regardless of whether leave was taken; it behaves
    /// as a fixed allowance component of gross pay.
    pub paid_leave: Decimal,

    /// Bonus: `(daily_rate + vda) × bonus_percent`.
    pub bonus: Decimal,

    /// `monthly_salary + vda + paid_leave + bonus`, before any deduction.
    pub gross_earnings: Decimal,

    /// Employee-side ESI contribution, computed on gross earnings.
    pub esi_employee: Decimal,

    /// Employer-side ESI contribution, computed on gross earnings.
    pub esi_employer: Decimal,

    /// Employee-side PF contribution, computed on monthly salary.
    pub pf_employee: Decimal,

    /// Employer-side PF contribution, computed on monthly salary.
    pub pf_employer: Decimal,

    /// Flat professional tax.
    pub professional_tax: Decimal,

    /// Labour Welfare Fund employee contribution. Carried for reporting;
    /// not included in `total_deductions`.
    pub lwf_employee: Decimal,

    /// Labour Welfare Fund employer contribution. Carried for reporting;
    /// not included in `ctc`.
    pub lwf_employer: Decimal,

    /// `pf_employee + esi_employee + professional_tax`.
    pub total_deductions: Decimal,

    /// Amount actually paid out: `gross_earnings − total_deductions`.
    pub net_salary: Decimal,

    /// Employer cost to company: `gross_earnings + pf_employer + esi_employer`.
    pub ctc: Decimal,
}

impl SalaryBreakdown {
    /// Returns a copy with every component rounded to two decimal places,
    /// half-up, for display or export.
    ///
    /// Rounding once at the boundary avoids compounding error across the
    /// derivation chain.
    pub fn rounded(&self) -> Self {
        Self {
            monthly_salary: round_half_up(self.monthly_salary),
            vda: round_half_up(self.vda),
            paid_leave: round_half_up(self.paid_leave),
            bonus: round_half_up(self.bonus),
            gross_earnings: round_half_up(self.gross_earnings),
            esi_employee: round_half_up(self.esi_employee),
            esi_employer: round_half_up(self.esi_employer),
            pf_employee: round_half_up(self.pf_employee),
            pf_employer: round_half_up(self.pf_employer),
            professional_tax: round_half_up(self.professional_tax),
            lwf_employee: round_half_up(self.lwf_employee),
            lwf_employer: round_half_up(self.lwf_employer),
            total_deductions: round_half_up(self.total_deductions),
            net_salary: round_half_up(self.net_salary),
            ctc: round_half_up(self.ctc),
        }
    }
}
