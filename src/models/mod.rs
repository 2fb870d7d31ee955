//! Core data models for BudgetIQ
//!
//! Incomes, expenses, categories and the calendar month that scopes them.

pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod month;

pub use category::{CategoryTab, ExpenseCategory};
pub use expense::{Expense, ExpenseDraft, ExpenseValidationError};
pub use ids::{ExpenseId, IncomeId};
pub use income::{Income, IncomeColor, IncomeValidationError, NewIncome};
pub use money::Money;
pub use month::{SelectedMonth, MONTH_NAMES};
