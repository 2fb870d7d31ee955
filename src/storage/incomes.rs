//! Income repository for JSON storage
//!
//! Manages loading and saving income sources to data/incomes.json. Records
//! keep their insertion order.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetError;
use crate::models::{Income, IncomeId};

use super::file_io::{read_collection, write_collection_atomic};

/// Repository for income persistence
pub struct IncomeRepository {
    path: PathBuf,
    data: RwLock<Vec<Income>>,
}

impl IncomeRepository {
    /// Create a new income repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load incomes from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let incomes: Vec<Income> = read_collection(&self.path)?;
        *self.write()? = incomes;
        Ok(())
    }

    /// Save incomes to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self.read()?;
        write_collection_atomic(&self.path, &data)
    }

    /// Get an income by ID
    pub fn get(&self, id: IncomeId) -> Result<Option<Income>, BudgetError> {
        Ok(self.read()?.iter().find(|i| i.id == id).cloned())
    }

    /// Get all incomes in insertion order
    pub fn get_all(&self) -> Result<Vec<Income>, BudgetError> {
        Ok(self.read()?.clone())
    }

    /// Incomes entered under a month label
    pub fn for_month(&self, label: &str) -> Result<Vec<Income>, BudgetError> {
        Ok(self
            .read()?
            .iter()
            .filter(|i| i.month == label)
            .cloned()
            .collect())
    }

    /// Append an income, returning the collection as it was before
    pub fn insert(&self, income: Income) -> Result<Vec<Income>, BudgetError> {
        let mut data = self.write()?;
        let previous = data.clone();
        data.push(income);
        Ok(previous)
    }

    /// Remove an income, returning the previous collection when it existed
    pub fn remove(&self, id: IncomeId) -> Result<Option<Vec<Income>>, BudgetError> {
        let mut data = self.write()?;
        let Some(position) = data.iter().position(|i| i.id == id) else {
            return Ok(None);
        };
        let previous = data.clone();
        data.remove(position);
        Ok(Some(previous))
    }

    /// Put back a collection captured before a failed save
    pub fn restore(&self, previous: Vec<Income>) -> Result<(), BudgetError> {
        *self.write()? = previous;
        Ok(())
    }

    /// Count incomes
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Income>>, BudgetError> {
        self.data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Income>>, BudgetError> {
        self.data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
