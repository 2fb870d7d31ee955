//! Service layer for BudgetIQ
//!
//! The service layer provides business logic on top of the record store:
//! month selection, aggregation, record editing and the dashboard session
//! that ties them to live subscriptions.

pub mod aggregation;
pub mod dashboard;
pub mod editor;
pub mod month;

pub use aggregation::{BudgetSummary, DashboardView, IncomeRow, IncomeStats};
pub use dashboard::Dashboard;
pub use editor::{EditorState, ExpenseForm, IncomeForm, Outcome, RecordEditor};
pub use month::MonthSelector;
