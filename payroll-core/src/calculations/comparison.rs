//! Period totals and month-over-month comparison.
//!
//! The dashboard view compares the two most recent payroll periods: employee
//! head-count, total net salary, and average net salary, each expressed as a
//! percentage change. This is a reporting path, not a transactional one — it
//! degrades to all-zero output on missing or empty periods and never errors.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::{PeriodTotals, compare_periods};
//!
//! let previous = PeriodTotals {
//!     employee_count: 4,
//!     total_net_salary: dec!(40000),
//!     average_net_salary: dec!(10000),
//! };
//! let current = PeriodTotals {
//!     employee_count: 5,
//!     total_net_salary: dec!(50000),
//!     average_net_salary: dec!(10000),
//! };
//!
//! let comparison = compare_periods(&current, &previous);
//!
//! assert_eq!(comparison.employee_count_change_percent, dec!(25.0));
//! assert_eq!(comparison.total_net_salary_change_percent, dec!(25.0));
//! assert_eq!(comparison.average_net_salary_change_percent, dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayPeriod, SalaryBreakdown};

/// Changes with absolute magnitude at or below this many percentage points
/// are reported as exactly zero. Display noise suppression, not a numeric
/// tolerance.
fn change_threshold() -> Decimal {
    Decimal::new(5, 2)
}

/// Net-salary totals for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub employee_count: usize,
    pub total_net_salary: Decimal,
    /// `total_net_salary / employee_count`, or zero for an empty period.
    /// The zero is an explicit policy, not a silent failure.
    pub average_net_salary: Decimal,
}

impl PeriodTotals {
    /// Sums a period's breakdowns. An empty slice yields all-zero totals.
    pub fn summarize(breakdowns: &[SalaryBreakdown]) -> Self {
        let employee_count = breakdowns.len();
        let total_net_salary: Decimal = breakdowns.iter().map(|b| b.net_salary).sum();
        let average_net_salary = if employee_count == 0 {
            Decimal::ZERO
        } else {
            total_net_salary / Decimal::from(employee_count)
        };
        Self {
            employee_count,
            total_net_salary,
            average_net_salary,
        }
    }
}

/// Month-over-month percentage changes between two periods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub employee_count_change_percent: Decimal,
    pub total_net_salary_change_percent: Decimal,
    pub average_net_salary_change_percent: Decimal,
}

/// Compares the current period against the previous one.
///
/// Percent change is `((current − previous) / previous) × 100` when the
/// previous value is nonzero. A zero baseline reports `0`: a percentage
/// change from nothing carries no signal, and this path must never produce
/// an infinity. Surviving changes are rounded to one decimal place for
/// display.
pub fn compare_periods(current: &PeriodTotals, previous: &PeriodTotals) -> PeriodComparison {
    PeriodComparison {
        employee_count_change_percent: percent_change(
            Decimal::from(current.employee_count),
            Decimal::from(previous.employee_count),
        ),
        total_net_salary_change_percent: percent_change(
            current.total_net_salary,
            previous.total_net_salary,
        ),
        average_net_salary_change_percent: percent_change(
            current.average_net_salary,
            previous.average_net_salary,
        ),
    }
}

/// Selects `(current, previous)` as the two most recent distinct periods by
/// calendar order. Returns `None` when fewer than two distinct periods exist.
pub fn latest_two_periods(periods: &[PayPeriod]) -> Option<(PayPeriod, PayPeriod)> {
    let mut sorted = periods.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    match sorted[..] {
        [.., previous, current] => Some((current, previous)),
        _ => None,
    }
}

fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    let change = (current - previous) / previous * Decimal::ONE_HUNDRED;
    if change.abs() <= change_threshold() {
        return Decimal::ZERO;
    }
    change.round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
