//! Display formatting for terminal output
//!
//! Provides utilities for formatting budget data for terminal display:
//! expense tables, income lists and the monthly summary cards.

pub mod expense;
pub mod summary;

pub use expense::{format_expense_details, format_expense_table};
pub use summary::{format_income_table, format_summary};
