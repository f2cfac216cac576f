use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeWageInput, PayPeriod};

/// A rostered employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub employee_id: String,
    pub name: String,
}

/// One employee's attendance and wage rate for one period.
///
/// This is the persisted record the calculator consumes; the resulting
/// [`SalaryBreakdown`](crate::SalaryBreakdown) is derived and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub employee_id: String,
    pub period: PayPeriod,
    pub daily_rate: Decimal,
    pub attendance_days: Decimal,
}

impl AttendanceEntry {
    /// The calculator-facing slice of this entry.
    pub fn wage_input(&self) -> EmployeeWageInput {
        EmployeeWageInput {
            daily_rate: self.daily_rate,
            attendance_days: self.attendance_days,
        }
    }
}
