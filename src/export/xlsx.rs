//! XLSX export of expenses
//!
//! One worksheet named "Expenses" with a header row followed by one row per
//! expense. Amounts are written as numbers so spreadsheet formulas work on
//! them; dates are ISO strings.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::{BudgetError, BudgetResult};
use crate::models::Expense;

use super::{EXPORT_COLUMNS, EXPORT_SHEET_NAME};

impl From<XlsxError> for BudgetError {
    fn from(err: XlsxError) -> Self {
        BudgetError::Export(err.to_string())
    }
}

/// Write `expenses` to a new workbook at `path`, replacing any existing file
pub fn export_expenses_xlsx(expenses: &[Expense], path: &Path) -> BudgetResult<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (index, expense) in expenses.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, expense.id.to_string())?;
        worksheet.write_string(row, 1, &expense.name)?;
        worksheet.write_string(row, 2, &expense.description)?;
        worksheet.write_string(row, 3, expense.category.as_str())?;
        worksheet.write_number_with_format(row, 4, expense.amount.as_f64(), &amount_format)?;
        worksheet.write_string(row, 5, expense.date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(row, 6, expense.income_id.to_string())?;
    }

    workbook.save(path)?;

    log::info!("Exported {} expenses to {}", expenses.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseDraft, ExpenseId, IncomeId, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_writes_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(crate::export::EXPORT_FILE_NAME);
        let expense = Expense::from_draft(
            ExpenseId::new(),
            ExpenseDraft {
                name: "Rent".into(),
                description: "March".into(),
                category: ExpenseCategory::Loans,
                amount: Money::from_units(15000),
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                income_id: IncomeId::new(),
            },
        );

        export_expenses_xlsx(&[expense], &path).unwrap();

        // XLSX is a zip container
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_list_still_writes_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.xlsx");

        export_expenses_xlsx(&[], &path).unwrap();
        assert!(path.exists());
    }
}
