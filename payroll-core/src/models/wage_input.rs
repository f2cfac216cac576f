use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The minimal data needed to compute one employee's pay for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeWageInput {
    /// Wage paid per attendance-day.
    pub daily_rate: Decimal,

    /// Attendance for the period. Fractional values are allowed
    /// (23.5 means 23 full days plus one half day); no calendar
    /// upper bound is enforced.
    pub attendance_days: Decimal,
}
