//! Expense model
//!
//! Expenses are dated, categorized and drawn against an income source. The
//! income reference is weak: nothing checks that the income still exists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::{ExpenseId, IncomeId};
use super::money::Money;

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NonPositiveAmount,
    AmountTooLarge,
    MissingIncome,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Expense amount cannot exceed {}", Money::MAX)
            }
            Self::MissingIncome => write!(f, "An income source must be selected"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Every user-editable field of an expense; updates replace all of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: Money,
    pub date: NaiveDate,
    pub income_id: IncomeId,
}

impl ExpenseDraft {
    /// Check the name and amount invariants
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: Money,
    pub date: NaiveDate,
    pub income_id: IncomeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Materialize a stored expense from its draft
    pub fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            amount: draft.amount,
            date: draft.date,
            income_id: draft.income_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every editable field from `draft`
    pub fn replace_with(&mut self, draft: ExpenseDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.category = draft.category;
        self.amount = draft.amount;
        self.date = draft.date;
        self.income_id = draft.income_id;
        self.updated_at = Utc::now();
    }

    /// The editable fields of this expense
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            amount: self.amount,
            date: self.date,
            income_id: self.income_id,
        }
    }

    /// Case-insensitive match of `query` against name or description
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
