//! CSV export of expenses

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Expense;

use super::EXPORT_COLUMNS;

/// Write one row per expense, preceded by the header row
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> BudgetResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(EXPORT_COLUMNS)
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    for expense in expenses {
        csv_writer
            .write_record([
                expense.id.to_string(),
                expense.name.clone(),
                expense.description.clone(),
                expense.category.as_str().to_string(),
                format!("{:.2}", expense.amount.as_f64()),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.income_id.to_string(),
            ])
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))
}
