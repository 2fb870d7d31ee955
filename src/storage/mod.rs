//! Storage layer for BudgetIQ
//!
//! Provides JSON collection storage with atomic writes, plus live query
//! subscriptions that push a fresh snapshot to every subscriber after each
//! successful write.

pub mod expenses;
pub mod file_io;
pub mod incomes;
pub mod subscription;

pub use expenses::ExpenseRepository;
pub use file_io::{read_collection, write_collection_atomic};
pub use incomes::IncomeRepository;
pub use subscription::{
    CancellationToken, ExpenseQuery, IncomeQuery, LiveQuery, Snapshot, Subscription,
    SubscriptionHub, SubscriptionId,
};

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId, Income, IncomeId, NewIncome};

/// The record store seam: writes, one-shot reads and live subscriptions over
/// the income and expense collections
pub trait RecordStore {
    /// Persist a new income and return it with its assigned id
    fn add_income(&self, income: NewIncome) -> BudgetResult<Income>;

    /// Delete an income; `false` when no income has this id
    fn delete_income(&self, id: IncomeId) -> BudgetResult<bool>;

    /// Persist a new expense and return it with its assigned id
    fn add_expense(&self, draft: ExpenseDraft) -> BudgetResult<Expense>;

    /// Replace every editable field of an existing expense
    fn update_expense(&self, id: ExpenseId, draft: ExpenseDraft) -> BudgetResult<Expense>;

    /// Delete an expense; `false` when no expense has this id
    fn delete_expense(&self, id: ExpenseId) -> BudgetResult<bool>;

    fn query_incomes(&self, query: &IncomeQuery) -> BudgetResult<Vec<Income>>;

    fn query_expenses(&self, query: &ExpenseQuery) -> BudgetResult<Vec<Expense>>;

    /// Start receiving income snapshots for a month
    fn subscribe_incomes(&self, query: IncomeQuery) -> BudgetResult<Subscription<Income>>;

    /// Start receiving expense snapshots for a date range
    fn subscribe_expenses(&self, query: ExpenseQuery) -> BudgetResult<Subscription<Expense>>;

    /// Stop pushes to a subscription of either collection
    fn unsubscribe(&self, id: SubscriptionId) -> BudgetResult<()>;
}

/// Main storage coordinator backed by the JSON collections
pub struct Storage {
    paths: BudgetPaths,
    pub incomes: IncomeRepository,
    pub expenses: ExpenseRepository,
    income_feed: SubscriptionHub<IncomeQuery, Income>,
    expense_feed: SubscriptionHub<ExpenseQuery, Expense>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            incomes: IncomeRepository::new(paths.incomes_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            income_feed: SubscriptionHub::new(),
            expense_feed: SubscriptionHub::new(),
            paths,
        })
    }

    /// Create a Storage instance and load both collections
    pub fn open(paths: BudgetPaths) -> Result<Self, BudgetError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BudgetError> {
        self.incomes.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Number of live subscriptions across both collections
    pub fn active_subscriptions(&self) -> usize {
        self.income_feed.active_count() + self.expense_feed.active_count()
    }

    fn commit_incomes(&self, previous: Vec<Income>) -> BudgetResult<()> {
        if let Err(e) = self.incomes.save() {
            self.incomes.restore(previous)?;
            return Err(e);
        }
        self.income_feed.publish(&self.incomes.get_all()?)
    }

    fn commit_expenses(&self, previous: Vec<Expense>) -> BudgetResult<()> {
        if let Err(e) = self.expenses.save() {
            self.expenses.restore(previous)?;
            return Err(e);
        }
        self.expense_feed.publish(&self.expenses.get_all()?)
    }
}

impl RecordStore for Storage {
    fn add_income(&self, income: NewIncome) -> BudgetResult<Income> {
        income
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let income = Income::from_new(IncomeId::new(), income);
        let previous = self.incomes.insert(income.clone())?;
        self.commit_incomes(previous)?;

        log::debug!("Added income {} for {}", income.id.short(), income.month);
        Ok(income)
    }

    fn delete_income(&self, id: IncomeId) -> BudgetResult<bool> {
        let Some(previous) = self.incomes.remove(id)? else {
            return Ok(false);
        };
        self.commit_incomes(previous)?;

        log::debug!("Deleted income {}", id.short());
        Ok(true)
    }

    fn add_expense(&self, draft: ExpenseDraft) -> BudgetResult<Expense> {
        draft
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let expense = Expense::from_draft(ExpenseId::new(), draft);
        let previous = self.expenses.insert(expense.clone())?;
        self.commit_expenses(previous)?;

        log::debug!("Added expense {} dated {}", expense.id.short(), expense.date);
        Ok(expense)
    }

    fn update_expense(&self, id: ExpenseId, draft: ExpenseDraft) -> BudgetResult<Expense> {
        draft
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let (expense, previous) = self
            .expenses
            .replace(id, draft)?
            .ok_or_else(|| BudgetError::expense_not_found(id.short()))?;
        self.commit_expenses(previous)?;

        log::debug!("Updated expense {}", id.short());
        Ok(expense)
    }

    fn delete_expense(&self, id: ExpenseId) -> BudgetResult<bool> {
        let Some(previous) = self.expenses.remove(id)? else {
            return Ok(false);
        };
        self.commit_expenses(previous)?;

        log::debug!("Deleted expense {}", id.short());
        Ok(true)
    }

    fn query_incomes(&self, query: &IncomeQuery) -> BudgetResult<Vec<Income>> {
        self.incomes.for_month(query.label())
    }

    fn query_expenses(&self, query: &ExpenseQuery) -> BudgetResult<Vec<Expense>> {
        self.expenses.between(query.start(), query.end())
    }

    fn subscribe_incomes(&self, query: IncomeQuery) -> BudgetResult<Subscription<Income>> {
        let subscription = self
            .income_feed
            .subscribe(query, &self.incomes.get_all()?)?;
        log::debug!(
            "Income subscription {} opened for {}",
            subscription.id(),
            subscription.month()
        );
        Ok(subscription)
    }

    fn subscribe_expenses(&self, query: ExpenseQuery) -> BudgetResult<Subscription<Expense>> {
        let subscription = self
            .expense_feed
            .subscribe(query, &self.expenses.get_all()?)?;
        log::debug!(
            "Expense subscription {} opened for {}",
            subscription.id(),
            subscription.month()
        );
        Ok(subscription)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> BudgetResult<()> {
        let removed =
            self.income_feed.unsubscribe(id)? || self.expense_feed.unsubscribe(id)?;
        if removed {
            log::debug!("Subscription {} closed", id);
        }
        Ok(())
    }
}
