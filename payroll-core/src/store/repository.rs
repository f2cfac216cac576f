use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AttendanceEntry, EmployeeProfile, PayPeriod, PayrollConfig};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Storage boundary for payroll settings, the employee roster, and attendance.
///
/// The calculator itself never touches this trait: configuration is loaded
/// here once and passed to the calculation layer explicitly. Computed
/// breakdowns are derived projections and are deliberately not persisted.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    // Settings (single company-wide row)
    async fn get_settings(&self) -> Result<PayrollConfig, RepositoryError>;
    async fn save_settings(&self, config: &PayrollConfig) -> Result<(), RepositoryError>;

    // Employee roster
    async fn upsert_employee(&self, employee: &EmployeeProfile) -> Result<(), RepositoryError>;
    async fn list_employees(&self) -> Result<Vec<EmployeeProfile>, RepositoryError>;

    // Attendance
    /// Replaces a period's attendance wholesale, so re-ingesting the same
    /// sheet is idempotent. Returns the number of entries inserted.
    async fn replace_period_attendance(
        &self,
        period: &PayPeriod,
        entries: &[AttendanceEntry],
    ) -> Result<usize, RepositoryError>;

    async fn get_period_attendance(
        &self,
        period: &PayPeriod,
    ) -> Result<Vec<AttendanceEntry>, RepositoryError>;

    /// Every period with at least one attendance entry, in calendar order.
    async fn list_periods(&self) -> Result<Vec<PayPeriod>, RepositoryError>;
}
