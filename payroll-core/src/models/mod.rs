mod attendance;
mod pay_period;
mod payroll_config;
mod salary_breakdown;
mod wage_input;

pub use attendance::{AttendanceEntry, EmployeeProfile};
pub use pay_period::{PayPeriod, PayPeriodError};
pub use payroll_config::{PayrollConfig, PayrollConfigError};
pub use salary_breakdown::SalaryBreakdown;
pub use wage_input::EmployeeWageInput;
