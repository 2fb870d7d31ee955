//! Export module for BudgetIQ
//!
//! Writes the expense list of a month to a spreadsheet:
//! - XLSX: the "Expenses" sheet of `Expenses.xlsx`
//! - CSV: the same columns, for tools that cannot read XLSX

pub mod csv;
pub mod xlsx;

pub use self::csv::export_expenses_csv;
pub use xlsx::export_expenses_xlsx;

/// Default file name of the spreadsheet export
pub const EXPORT_FILE_NAME: &str = "Expenses.xlsx";

/// Name of the worksheet holding the expense rows
pub const EXPORT_SHEET_NAME: &str = "Expenses";

/// Column headers shared by every export format, in order
pub const EXPORT_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "description",
    "category",
    "amount",
    "date",
    "incomeId",
];
