//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod income;
pub mod session;
pub mod summary;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use income::{handle_income_command, IncomeCommands};
pub use session::{handle_login, handle_logout, handle_register, handle_whoami, Credentials};
pub use summary::{handle_summary_command, SummaryArgs};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, SelectedMonth};
use crate::services::MonthSelector;

/// Resolve a `--month` argument ("March" or "March 2026"), defaulting to the
/// current month
pub(crate) fn resolve_month(
    selector: &MonthSelector,
    month: Option<&str>,
) -> BudgetResult<SelectedMonth> {
    match month {
        Some(label) => selector.resolve(label),
        None => Ok(selector.current()),
    }
}

/// Parse a user-typed amount
pub(crate) fn parse_amount(amount: &str) -> BudgetResult<Money> {
    Money::parse(amount).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

/// Pick the single record an identifier refers to
pub(crate) fn single_match<T>(
    mut matches: Vec<T>,
    identifier: &str,
    not_found: impl FnOnce() -> BudgetError,
) -> BudgetResult<T> {
    match matches.len() {
        0 => Err(not_found()),
        1 => Ok(matches.remove(0)),
        _ => Err(BudgetError::Validation(format!(
            "'{}' matches more than one record; use a longer id",
            identifier
        ))),
    }
}
