//! Dashboard session
//!
//! Holds the selected month, the live income and expense subscriptions for
//! it, the latest snapshot of each, the search query and the editor state.
//! Switching months cancels the old pair of subscriptions before the new
//! pair is opened, and any push tagged for another subscription or month is
//! discarded when drained.

use std::path::{Path, PathBuf};

use crate::error::{BudgetError, BudgetResult};
use crate::export;
use crate::models::{CategoryTab, Expense, ExpenseId, Income, IncomeId, SelectedMonth};
use crate::storage::{ExpenseQuery, IncomeQuery, RecordStore, Snapshot, Subscription};

use super::aggregation::{self, DashboardView};
use super::editor::{EditorState, Outcome, RecordEditor};
use super::month::MonthSelector;

/// A signed-in user's view of one month
pub struct Dashboard<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    selector: MonthSelector,
    month: SelectedMonth,
    income_sub: Option<Subscription<Income>>,
    expense_sub: Option<Subscription<Expense>>,
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
    query: String,
    editor: EditorState,
}

impl<'a, S: RecordStore + ?Sized> Dashboard<'a, S> {
    /// Open a dashboard on `month` and take the initial snapshots
    pub fn open(store: &'a S, selector: MonthSelector, month: SelectedMonth) -> BudgetResult<Self> {
        let mut dashboard = Self {
            store,
            selector,
            month,
            income_sub: None,
            expense_sub: None,
            incomes: Vec::new(),
            expenses: Vec::new(),
            query: String::new(),
            editor: EditorState::default(),
        };
        dashboard.subscribe()?;
        Ok(dashboard)
    }

    pub fn month(&self) -> SelectedMonth {
        self.month
    }

    pub fn selector(&self) -> MonthSelector {
        self.selector
    }

    /// Latest income snapshot
    pub fn incomes(&self) -> &[Income] {
        &self.incomes
    }

    /// Latest expense snapshot, before search filtering
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn editor_state(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_state_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    /// Switch to a month picked by name in the selector's reference year
    pub fn select_month(&mut self, label: &str) -> BudgetResult<()> {
        let month = self.selector.select(label)?;
        self.set_month(month)
    }

    /// Switch months, replacing both subscriptions
    pub fn set_month(&mut self, month: SelectedMonth) -> BudgetResult<()> {
        log::info!("Switching month from {} to {}", self.month, month);
        self.cancel_subscriptions();
        self.month = month;
        self.incomes.clear();
        self.expenses.clear();
        self.subscribe()
    }

    pub fn next_month(&mut self) -> BudgetResult<()> {
        self.set_month(self.month.next())
    }

    pub fn prev_month(&mut self) -> BudgetResult<()> {
        self.set_month(self.month.prev())
    }

    /// Drain pending pushes from both subscriptions
    ///
    /// Returns whether any snapshot was applied.
    pub fn pump(&mut self) -> bool {
        let income_push = self.income_sub.as_ref().and_then(|s| s.try_latest());
        let expense_push = self.expense_sub.as_ref().and_then(|s| s.try_latest());

        let mut applied = false;
        if let Some(snapshot) = income_push {
            applied |= self.apply_incomes(snapshot);
        }
        if let Some(snapshot) = expense_push {
            applied |= self.apply_expenses(snapshot);
        }
        applied
    }

    /// Replace the income list, unless the push belongs to a superseded
    /// subscription or month
    pub fn apply_incomes(&mut self, snapshot: Snapshot<Income>) -> bool {
        let current = self.income_sub.as_ref().map(|s| s.id());
        if current != Some(snapshot.subscription) || snapshot.month != self.month {
            log::debug!(
                "Discarding stale income push from subscription {} ({})",
                snapshot.subscription,
                snapshot.month
            );
            return false;
        }
        self.incomes = snapshot.records;
        true
    }

    /// Replace the expense list, unless the push belongs to a superseded
    /// subscription or month
    pub fn apply_expenses(&mut self, snapshot: Snapshot<Expense>) -> bool {
        let current = self.expense_sub.as_ref().map(|s| s.id());
        if current != Some(snapshot.subscription) || snapshot.month != self.month {
            log::debug!(
                "Discarding stale expense push from subscription {} ({})",
                snapshot.subscription,
                snapshot.month
            );
            return false;
        }
        self.expenses = snapshot.records;
        true
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Aggregates for the current month and query
    pub fn view(&self) -> DashboardView {
        DashboardView::compute(&self.incomes, &self.expenses, self.month, &self.query)
    }

    /// Filtered expenses under a category tab
    pub fn expenses_in_tab(&self, tab: CategoryTab) -> Vec<Expense> {
        self.view().in_tab(tab)
    }

    pub fn income_label(&self, income_id: IncomeId) -> String {
        aggregation::income_label(&self.incomes, income_id)
    }

    /// Find an expense of this month by full, short or prefix id
    pub fn find_expense(&self, identifier: &str) -> BudgetResult<Expense> {
        let mut matches = self.expenses.iter().filter(|e| e.id.matches(identifier));
        let found = matches
            .next()
            .ok_or_else(|| BudgetError::expense_not_found(identifier))?;
        if matches.next().is_some() {
            return Err(BudgetError::Validation(format!(
                "Expense id '{}' is ambiguous",
                identifier
            )));
        }
        Ok(found.clone())
    }

    /// Find an income of this month by case-insensitive name or by id
    pub fn find_income(&self, identifier: &str) -> BudgetResult<Income> {
        let identifier = identifier.trim();
        let by_name: Vec<_> = self
            .incomes
            .iter()
            .filter(|i| i.name.eq_ignore_ascii_case(identifier))
            .collect();
        let candidates = if by_name.is_empty() {
            self.incomes
                .iter()
                .filter(|i| i.id.matches(identifier))
                .collect()
        } else {
            by_name
        };

        match candidates.as_slice() {
            [income] => Ok((*income).clone()),
            [] => Err(BudgetError::income_not_found(identifier)),
            _ => Err(BudgetError::Validation(format!(
                "Income '{}' is ambiguous",
                identifier
            ))),
        }
    }

    /// Submit the income form for the current month
    pub fn create_income(&mut self) -> BudgetResult<Outcome<Income>> {
        let editor = RecordEditor::new(self.store);
        let outcome = editor.create_income(&mut self.editor, self.month, self.incomes.len())?;
        self.pump();
        Ok(outcome)
    }

    /// Submit the expense form, creating or updating
    pub fn submit_expense(&mut self) -> BudgetResult<Outcome<Expense>> {
        let editor = RecordEditor::new(self.store);
        let outcome = editor.submit_expense(&mut self.editor)?;
        self.pump();
        Ok(outcome)
    }

    /// Submit the expense form as a new expense
    pub fn create_expense(&mut self) -> BudgetResult<Outcome<Expense>> {
        let editor = RecordEditor::new(self.store);
        let outcome = editor.create_expense(&mut self.editor)?;
        self.pump();
        Ok(outcome)
    }

    /// Load an expense into the form for update
    pub fn begin_edit(&mut self, expense: &Expense) {
        RecordEditor::new(self.store).begin_edit(&mut self.editor, expense);
    }

    pub fn commit_edit(&mut self) -> BudgetResult<Outcome<Expense>> {
        let editor = RecordEditor::new(self.store);
        let outcome = editor.commit_edit(&mut self.editor)?;
        self.pump();
        Ok(outcome)
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> BudgetResult<bool> {
        let deleted = RecordEditor::new(self.store).delete_expense(id)?;
        self.pump();
        Ok(deleted)
    }

    pub fn delete_income(&mut self, id: IncomeId) -> BudgetResult<bool> {
        let deleted = RecordEditor::new(self.store).delete_income(id)?;
        self.pump();
        Ok(deleted)
    }

    /// Write this month's expenses to `dir/file_name` as XLSX
    pub fn export_xlsx(&self, dir: &Path, file_name: &str) -> BudgetResult<PathBuf> {
        let path = dir.join(file_name);
        export::export_expenses_xlsx(&self.expenses, &path)?;
        Ok(path)
    }

    fn subscribe(&mut self) -> BudgetResult<()> {
        self.income_sub = Some(
            self.store
                .subscribe_incomes(IncomeQuery::for_month(self.month))?,
        );
        self.expense_sub = Some(
            self.store
                .subscribe_expenses(ExpenseQuery::for_month(self.month))?,
        );
        self.pump();
        Ok(())
    }

    /// Cancel and release both subscriptions
    ///
    /// A cancelled handle is pruned by the store on its next publish, so an
    /// unsubscribe failure is logged and does not stop the teardown.
    fn cancel_subscriptions(&mut self) {
        let income_id = self.income_sub.take().map(|s| {
            s.cancel();
            s.id()
        });
        let expense_id = self.expense_sub.take().map(|s| {
            s.cancel();
            s.id()
        });
        for id in [income_id, expense_id].into_iter().flatten() {
            if let Err(e) = self.store.unsubscribe(id) {
                log::warn!("Failed to release subscription {}: {}", id, e);
            }
        }
    }
}

impl<S: RecordStore + ?Sized> Drop for Dashboard<'_, S> {
    fn drop(&mut self) {
        self.cancel_subscriptions();
    }
}
