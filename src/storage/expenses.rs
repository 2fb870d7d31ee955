//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to data/expenses.json.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::error::BudgetError;
use crate::models::{Expense, ExpenseDraft, ExpenseId};

use super::file_io::{read_collection, write_collection_atomic};

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let expenses: Vec<Expense> = read_collection(&self.path)?;
        *self.write()? = expenses;
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self.read()?;
        write_collection_atomic(&self.path, &data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, BudgetError> {
        Ok(self.read()?.iter().find(|e| e.id == id).cloned())
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, BudgetError> {
        Ok(self.read()?.clone())
    }

    /// Expenses dated within `[start, end]`
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>, BudgetError> {
        Ok(self
            .read()?
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect())
    }

    /// Append an expense, returning the collection as it was before
    pub fn insert(&self, expense: Expense) -> Result<Vec<Expense>, BudgetError> {
        let mut data = self.write()?;
        let previous = data.clone();
        data.push(expense);
        Ok(previous)
    }

    /// Overwrite every editable field of an expense
    ///
    /// Returns the updated record and the previous collection, or `None`
    /// when no expense has this id.
    pub fn replace(
        &self,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Option<(Expense, Vec<Expense>)>, BudgetError> {
        let mut data = self.write()?;
        let Some(position) = data.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let previous = data.clone();
        data[position].replace_with(draft);
        Ok(Some((data[position].clone(), previous)))
    }

    /// Remove an expense, returning the previous collection when it existed
    pub fn remove(&self, id: ExpenseId) -> Result<Option<Vec<Expense>>, BudgetError> {
        let mut data = self.write()?;
        let Some(position) = data.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let previous = data.clone();
        data.remove(position);
        Ok(Some(previous))
    }

    /// Put back a collection captured before a failed save
    pub fn restore(&self, previous: Vec<Expense>) -> Result<(), BudgetError> {
        *self.write()? = previous;
        Ok(())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Expense>>, BudgetError> {
        self.data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Expense>>, BudgetError> {
        self.data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
