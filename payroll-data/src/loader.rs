//! Attendance-sheet ingestion.
//!
//! Uploaded attendance sheets arrive as loosely-typed CSV rows: ids may be
//! blank, rates may be missing, and spreadsheet footers ("Total", "Grand
//! Total") appear as data rows. Everything here exists to turn those rows
//! into typed [`AttendanceEntry`] records *before* they reach the
//! calculator, with one hard rule: a missing or malformed financial field is
//! rejected with the row number and reason, never defaulted to zero. A
//! zero-defaulted wage looks exactly like a legitimate unpaid employee and
//! corrupts every downstream total without a visible signal.

use std::io::Read;

use payroll_core::{AttendanceEntry, EmployeeProfile, PayPeriod, PayrollRepository, RepositoryError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Errors that abort sheet ingestion outright.
///
/// Per-row problems never surface here; they are collected as [`RowError`]s
/// so the rest of the sheet still loads.
#[derive(Debug, Error)]
pub enum AttendanceSheetError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for AttendanceSheetError {
    fn from(err: csv::Error) -> Self {
        AttendanceSheetError::CsvParse(err.to_string())
    }
}

/// Spreadsheet footer keywords. A row whose employee id contains one of
/// these is a summary line, not an employee.
const SUMMARY_KEYWORDS: [&str; 4] = ["total", "sum", "grand", "subtotal"];

/// One raw row as it appears in the sheet. Every field is optional because
/// the upstream export makes no guarantees.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AttendanceSheetRow {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub daily_rate: Option<String>,
    pub attendance_days: Option<String>,
}

/// Why a row was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowIssue {
    #[error("employee id is missing")]
    MissingEmployeeId,

    #[error("{field} is missing")]
    MissingField { field: &'static str },

    #[error("{field} '{value}' is not a valid number")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: Decimal },

    #[error("'{employee_id}' looks like a spreadsheet summary row")]
    SummaryRow { employee_id: String },
}

/// A rejected row: 1-based data row number plus the reason, so the operator
/// can find it in the sheet.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("row {row}: {issue}")]
pub struct RowError {
    pub row: usize,
    pub issue: RowIssue,
}

/// A row that survived validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRecord {
    pub employee: EmployeeProfile,
    pub entry: AttendanceEntry,
}

/// Validation outcome: every raw row lands in exactly one list.
#[derive(Debug, Default)]
pub struct ValidatedSheet {
    pub records: Vec<SheetRecord>,
    pub rejected: Vec<RowError>,
}

/// Loader for attendance sheets exported as CSV.
///
/// Parsing, validation and loading are separate steps so callers can report
/// rejected rows before anything touches the database.
pub struct AttendanceSheetLoader;

impl AttendanceSheetLoader {
    /// Parses raw rows from a CSV reader with an
    /// `employee_id,name,daily_rate,attendance_days` header.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<AttendanceSheetRow>, AttendanceSheetError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();

        for result in csv_reader.deserialize() {
            let row: AttendanceSheetRow = result?;
            rows.push(row);
        }

        Ok(rows)
    }

    /// Validates raw rows into attendance records for `period`.
    ///
    /// Rejection rules, applied in order per row:
    /// - blank employee id;
    /// - id containing a summary keyword (`total`, `sum`, `grand`,
    ///   `subtotal` — spreadsheet footers masquerading as data);
    /// - missing or unparseable `daily_rate` / `attendance_days`;
    /// - negative `daily_rate` / `attendance_days`.
    ///
    /// A missing name is not a rejection: the employee id stands in for it.
    /// Zero attendance is valid — the calculator handles it.
    pub fn validate(rows: &[AttendanceSheetRow], period: PayPeriod) -> ValidatedSheet {
        let mut sheet = ValidatedSheet::default();

        for (index, row) in rows.iter().enumerate() {
            // Header is line 1; data rows are 1-based after it.
            let row_number = index + 1;
            match validate_row(row, period) {
                Ok(record) => sheet.records.push(record),
                Err(issue) => {
                    warn!(row = row_number, %issue, "rejected attendance row");
                    sheet.rejected.push(RowError {
                        row: row_number,
                        issue,
                    });
                }
            }
        }

        sheet
    }

    /// Loads validated records: upserts each employee, then replaces the
    /// period's attendance wholesale. Re-loading the same sheet is
    /// idempotent. Returns the number of attendance entries inserted.
    pub async fn load<R: PayrollRepository>(
        repo: &R,
        period: &PayPeriod,
        sheet: &ValidatedSheet,
    ) -> Result<usize, AttendanceSheetError> {
        for record in &sheet.records {
            repo.upsert_employee(&record.employee).await?;
        }

        let entries: Vec<AttendanceEntry> =
            sheet.records.iter().map(|r| r.entry.clone()).collect();
        let inserted = repo.replace_period_attendance(period, &entries).await?;

        Ok(inserted)
    }
}

fn validate_row(row: &AttendanceSheetRow, period: PayPeriod) -> Result<SheetRecord, RowIssue> {
    let employee_id = row
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(RowIssue::MissingEmployeeId)?;

    let lowered = employee_id.to_lowercase();
    if SUMMARY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Err(RowIssue::SummaryRow {
            employee_id: employee_id.to_string(),
        });
    }

    let daily_rate = required_decimal("daily_rate", row.daily_rate.as_deref())?;
    let attendance_days = required_decimal("attendance_days", row.attendance_days.as_deref())?;

    let name = row
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(employee_id);

    Ok(SheetRecord {
        employee: EmployeeProfile {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
        },
        entry: AttendanceEntry {
            employee_id: employee_id.to_string(),
            period,
            daily_rate,
            attendance_days,
        },
    })
}

fn required_decimal(field: &'static str, value: Option<&str>) -> Result<Decimal, RowIssue> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(RowIssue::MissingField { field })?;

    let parsed = raw
        .parse::<Decimal>()
        .map_err(|_| RowIssue::InvalidDecimal {
            field,
            value: raw.to_string(),
        })?;

    if parsed < Decimal::ZERO {
        return Err(RowIssue::NegativeValue {
            field,
            value: parsed,
        });
    }

    Ok(parsed)
}
