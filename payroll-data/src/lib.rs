mod loader;

pub use loader::{
    AttendanceSheetError, AttendanceSheetLoader, AttendanceSheetRow, RowError, RowIssue,
    SheetRecord, ValidatedSheet,
};
