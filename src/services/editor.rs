//! Record editor service
//!
//! Turns create/update/delete intents into record store calls. All view
//! state (the two forms, the dialog flags and the editing cursor) lives in an
//! explicit `EditorState` owned by the caller, so the editor itself only
//! borrows the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BudgetResult;
use crate::models::{
    Expense, ExpenseCategory, ExpenseDraft, ExpenseId, ExpenseValidationError, Income,
    IncomeColor, IncomeId, Money, NewIncome, SelectedMonth,
};
use crate::storage::RecordStore;

/// The "add income" form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeForm {
    pub name: String,
    pub amount: Money,
}

/// The expense form, shared by create and update mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub name: String,
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: Money,
    pub date: NaiveDate,
    pub income_id: Option<IncomeId>,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: ExpenseCategory::default(),
            amount: Money::zero(),
            date: chrono::Local::now().date_naive(),
            income_id: None,
        }
    }
}

impl ExpenseForm {
    fn from_expense(expense: &Expense) -> Self {
        Self {
            name: expense.name.clone(),
            description: expense.description.clone(),
            category: expense.category,
            amount: expense.amount,
            date: expense.date,
            income_id: Some(expense.income_id),
        }
    }

    /// The draft this form describes, or why it cannot be submitted
    fn to_draft(&self) -> Result<ExpenseDraft, ExpenseValidationError> {
        let income_id = self.income_id.ok_or(ExpenseValidationError::MissingIncome)?;
        let draft = ExpenseDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            amount: self.amount,
            date: self.date,
            income_id,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Dialog flags, forms and the editing cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub income_form: IncomeForm,
    pub expense_form: ExpenseForm,
    pub income_dialog_open: bool,
    pub expense_dialog_open: bool,
    /// The expense open for update; `None` in create mode
    pub editing: Option<ExpenseId>,
}

impl EditorState {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// Result of a submission that reached validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Accepted(T),
    /// Nothing was submitted; the form is left as it was
    Rejected(String),
}

impl<T> Outcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }
}

/// Service for record editing
pub struct RecordEditor<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> RecordEditor<'a, S> {
    /// Create a new record editor
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn open_income_dialog(&self, state: &mut EditorState) {
        state.income_dialog_open = true;
    }

    pub fn close_income_dialog(&self, state: &mut EditorState) {
        state.income_dialog_open = false;
    }

    /// Open the expense dialog in create mode
    pub fn open_expense_dialog(&self, state: &mut EditorState) {
        state.editing = None;
        state.expense_form = ExpenseForm::default();
        state.expense_dialog_open = true;
    }

    /// Dismiss the expense dialog, abandoning any edit in progress
    pub fn close_expense_dialog(&self, state: &mut EditorState) {
        state.expense_dialog_open = false;
        state.editing = None;
    }

    /// Submit the income form for `month`
    ///
    /// `existing` is the number of incomes already in the month and picks
    /// the palette color.
    pub fn create_income(
        &self,
        state: &mut EditorState,
        month: SelectedMonth,
        existing: usize,
    ) -> BudgetResult<Outcome<Income>> {
        let draft = NewIncome {
            name: state.income_form.name.trim().to_string(),
            amount: state.income_form.amount,
            color: IncomeColor::for_index(existing),
            month: month.label(),
        };
        if let Err(reason) = draft.validate() {
            return Ok(Outcome::Rejected(reason.to_string()));
        }

        let income = self.store.add_income(draft).map_err(|e| {
            log::error!("Failed to add income: {}", e);
            e
        })?;

        state.income_form = IncomeForm::default();
        state.income_dialog_open = false;
        Ok(Outcome::Accepted(income))
    }

    /// Submit the expense form as a new expense
    pub fn create_expense(&self, state: &mut EditorState) -> BudgetResult<Outcome<Expense>> {
        let draft = match state.expense_form.to_draft() {
            Ok(draft) => draft,
            Err(reason) => return Ok(Outcome::Rejected(reason.to_string())),
        };

        let expense = self.store.add_expense(draft).map_err(|e| {
            log::error!("Failed to add expense: {}", e);
            e
        })?;

        state.expense_form = ExpenseForm::default();
        state.expense_dialog_open = false;
        Ok(Outcome::Accepted(expense))
    }

    /// Load an expense into the form and switch to update mode
    pub fn begin_edit(&self, state: &mut EditorState, expense: &Expense) {
        state.editing = Some(expense.id);
        state.expense_form = ExpenseForm::from_expense(expense);
        state.expense_dialog_open = true;
    }

    /// Overwrite the expense under the cursor with the whole form
    pub fn commit_edit(&self, state: &mut EditorState) -> BudgetResult<Outcome<Expense>> {
        let Some(id) = state.editing else {
            return Ok(Outcome::Rejected("No expense is being edited".into()));
        };
        let draft = match state.expense_form.to_draft() {
            Ok(draft) => draft,
            Err(reason) => return Ok(Outcome::Rejected(reason.to_string())),
        };

        let expense = self.store.update_expense(id, draft).map_err(|e| {
            log::error!("Failed to update expense {}: {}", id.short(), e);
            e
        })?;

        state.editing = None;
        state.expense_form = ExpenseForm::default();
        state.expense_dialog_open = false;
        Ok(Outcome::Accepted(expense))
    }

    /// Update when a cursor is set, create otherwise
    pub fn submit_expense(&self, state: &mut EditorState) -> BudgetResult<Outcome<Expense>> {
        if state.is_editing() {
            self.commit_edit(state)
        } else {
            self.create_expense(state)
        }
    }

    /// Delete an expense immediately
    pub fn delete_expense(&self, id: ExpenseId) -> BudgetResult<bool> {
        self.store.delete_expense(id).map_err(|e| {
            log::error!("Failed to delete expense {}: {}", id.short(), e);
            e
        })
    }

    /// Delete an income immediately; expenses drawn from it are kept
    pub fn delete_income(&self, id: IncomeId) -> BudgetResult<bool> {
        self.store.delete_income(id).map_err(|e| {
            log::error!("Failed to delete income {}: {}", id.short(), e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::error::BudgetError;
    use crate::models::IncomeValidationError;
    use crate::storage::{
        ExpenseQuery, IncomeQuery, Storage, Subscription, SubscriptionId,
    };
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn march() -> SelectedMonth {
        SelectedMonth::new(2026, 3).unwrap()
    }

    fn march_expenses(storage: &Storage) -> Vec<Expense> {
        storage
            .query_expenses(&ExpenseQuery::for_month(march()))
            .unwrap()
    }

    fn fill_income(state: &mut EditorState, name: &str, units: i64) {
        state.income_form = IncomeForm {
            name: name.into(),
            amount: Money::from_units(units),
        };
    }

    fn fill_expense(state: &mut EditorState, name: &str, units: i64, income: Option<IncomeId>) {
        state.expense_form = ExpenseForm {
            name: name.into(),
            description: String::new(),
            category: ExpenseCategory::Loans,
            amount: Money::from_units(units),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            income_id: income,
        };
    }

    /// A store whose every write fails
    struct FailingStore;

    impl RecordStore for FailingStore {
        fn add_income(&self, _: NewIncome) -> BudgetResult<Income> {
            Err(BudgetError::Storage("disk full".into()))
        }
        fn delete_income(&self, _: IncomeId) -> BudgetResult<bool> {
            Err(BudgetError::Storage("disk full".into()))
        }
        fn add_expense(&self, _: ExpenseDraft) -> BudgetResult<Expense> {
            Err(BudgetError::Storage("disk full".into()))
        }
        fn update_expense(&self, _: ExpenseId, _: ExpenseDraft) -> BudgetResult<Expense> {
            Err(BudgetError::Storage("disk full".into()))
        }
        fn delete_expense(&self, _: ExpenseId) -> BudgetResult<bool> {
            Err(BudgetError::Storage("disk full".into()))
        }
        fn query_incomes(&self, _: &IncomeQuery) -> BudgetResult<Vec<Income>> {
            Ok(Vec::new())
        }
        fn query_expenses(&self, _: &ExpenseQuery) -> BudgetResult<Vec<Expense>> {
            Ok(Vec::new())
        }
        fn subscribe_incomes(&self, _: IncomeQuery) -> BudgetResult<Subscription<Income>> {
            Err(BudgetError::Subscription("offline".into()))
        }
        fn subscribe_expenses(&self, _: ExpenseQuery) -> BudgetResult<Subscription<Expense>> {
            Err(BudgetError::Subscription("offline".into()))
        }
        fn unsubscribe(&self, _: SubscriptionId) -> BudgetResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_create_income_assigns_color_and_month() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();

        editor.open_income_dialog(&mut state);
        fill_income(&mut state, "Arun", 80000);
        let income = editor
            .create_income(&mut state, march(), 9)
            .unwrap()
            .accepted()
            .unwrap();

        assert_eq!(income.color, IncomeColor::Blue);
        assert_eq!(income.month, "March 2026");
        assert_eq!(state.income_form, IncomeForm::default());
        assert!(!state.income_dialog_open);
    }

    #[test]
    fn test_invalid_income_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();

        editor.open_income_dialog(&mut state);
        fill_income(&mut state, "Arun", 0);
        let outcome = editor.create_income(&mut state, march(), 0).unwrap();

        assert!(!outcome.is_accepted());
        assert!(state.income_dialog_open);
        assert_eq!(state.income_form.name, "Arun");
        assert_eq!(storage.incomes.count().unwrap(), 0);
    }

    #[test]
    fn test_zero_amount_expense_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();

        editor.open_expense_dialog(&mut state);
        fill_expense(&mut state, "Rent", 0, Some(IncomeId::new()));
        let outcome = editor.create_expense(&mut state).unwrap();

        assert!(!outcome.is_accepted());
        assert!(march_expenses(&storage).is_empty());
        assert!(state.expense_dialog_open);
    }

    #[test]
    fn test_oversized_income_is_rejected_before_totals() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();

        fill_income(&mut state, "Arun", 1);
        state.income_form.amount = Money::from_cents(i64::MAX);
        let outcome = editor.create_income(&mut state, march(), 0).unwrap();

        assert_eq!(
            outcome,
            Outcome::Rejected(IncomeValidationError::AmountTooLarge.to_string())
        );
        assert_eq!(storage.incomes.count().unwrap(), 0);
    }

    #[test]
    fn test_expense_requires_income() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();

        fill_expense(&mut state, "Rent", 15000, None);
        let outcome = editor.create_expense(&mut state).unwrap();

        assert_eq!(
            outcome,
            Outcome::Rejected(ExpenseValidationError::MissingIncome.to_string())
        );
    }

    #[test]
    fn test_edit_overwrites_record() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();
        let income = IncomeId::new();

        fill_expense(&mut state, "Rent", 15000, Some(income));
        let rent = editor.create_expense(&mut state).unwrap().accepted().unwrap();

        editor.begin_edit(&mut state, &rent);
        assert_eq!(state.editing, Some(rent.id));
        assert_eq!(state.expense_form.name, "Rent");

        state.expense_form.amount = Money::from_units(16000);
        state.expense_form.description = "New lease".into();
        let updated = editor.submit_expense(&mut state).unwrap().accepted().unwrap();

        assert_eq!(updated.id, rent.id);
        assert_eq!(updated.amount, Money::from_units(16000));
        assert_eq!(updated.description, "New lease");
        assert!(state.editing.is_none());
        assert!(!state.expense_dialog_open);
        assert_eq!(march_expenses(&storage), vec![updated]);
    }

    #[test]
    fn test_commit_without_cursor_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();

        fill_expense(&mut state, "Rent", 15000, Some(IncomeId::new()));
        assert!(!editor.commit_edit(&mut state).unwrap().is_accepted());
    }

    #[test]
    fn test_open_dialog_clears_cursor() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();

        fill_expense(&mut state, "Rent", 15000, Some(IncomeId::new()));
        let rent = editor.create_expense(&mut state).unwrap().accepted().unwrap();
        editor.begin_edit(&mut state, &rent);

        editor.open_expense_dialog(&mut state);
        assert!(state.editing.is_none());
        assert!(state.expense_form.name.is_empty());
    }

    #[test]
    fn test_create_then_delete_restores_list() {
        let (_temp_dir, storage) = create_test_storage();
        let editor = RecordEditor::new(&storage);
        let mut state = EditorState::default();
        let before = march_expenses(&storage);

        fill_expense(&mut state, "Movie", 500, Some(IncomeId::new()));
        let movie = editor.create_expense(&mut state).unwrap().accepted().unwrap();
        assert!(editor.delete_expense(movie.id).unwrap());

        assert_eq!(march_expenses(&storage), before);
    }

    #[test]
    fn test_store_failure_leaves_form_untouched() {
        let editor = RecordEditor::new(&FailingStore);
        let mut state = EditorState::default();

        editor.open_expense_dialog(&mut state);
        fill_expense(&mut state, "Rent", 15000, Some(IncomeId::new()));
        let snapshot = state.clone();

        assert!(editor.create_expense(&mut state).is_err());
        assert_eq!(state, snapshot);

        fill_income(&mut state, "Arun", 80000);
        assert!(editor.create_income(&mut state, march(), 0).is_err());
        assert_eq!(state.income_form.name, "Arun");
    }
}
