//! Income source model
//!
//! An income source belongs to the month label it was entered under and is
//! never edited in place; corrections are made by adding a new source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::IncomeId;
use super::money::Money;

/// Validation errors for income sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptyName,
    NonPositiveAmount,
    AmountTooLarge,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Income name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Income amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Income amount cannot exceed {}", Money::MAX)
            }
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// Display tag assigned to an income source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomeColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Indigo,
    Teal,
}

impl IncomeColor {
    /// The palette, in assignment order
    pub const PALETTE: [IncomeColor; 8] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Pink,
        Self::Indigo,
        Self::Teal,
    ];

    /// Color for the income added after `existing` others in the same month
    pub fn for_index(existing: usize) -> Self {
        Self::PALETTE[existing % Self::PALETTE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Indigo => "indigo",
            Self::Teal => "teal",
        }
    }
}

impl fmt::Display for IncomeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Fields of an income source before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncome {
    pub name: String,
    pub amount: Money,
    pub color: IncomeColor,
    /// Month label, "MMMM yyyy"
    pub month: String,
}

/// An income source for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub color: IncomeColor,
    /// Month label, "MMMM yyyy"
    pub month: String,
    pub created_at: DateTime<Utc>,
}

impl Income {
    /// Materialize a stored income from its draft
    pub fn from_new(id: IncomeId, draft: NewIncome) -> Self {
        Self {
            id,
            name: draft.name,
            amount: draft.amount,
            color: draft.color,
            month: draft.month,
            created_at: Utc::now(),
        }
    }
}

impl NewIncome {
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.name.trim().is_empty() {
            return Err(IncomeValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(IncomeValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, amount: i64) -> NewIncome {
        NewIncome {
            name: name.into(),
            amount: Money::from_units(amount),
            color: IncomeColor::Red,
            month: "March 2026".into(),
        }
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(IncomeColor::for_index(0), IncomeColor::Red);
        assert_eq!(IncomeColor::for_index(1), IncomeColor::Blue);
        assert_eq!(IncomeColor::for_index(7), IncomeColor::Teal);
        assert_eq!(IncomeColor::for_index(8), IncomeColor::Red);
        assert_eq!(IncomeColor::for_index(9), IncomeColor::Blue);
    }

    #[test]
    fn test_validation() {
        assert!(draft("Arun", 80000).validate().is_ok());
        assert_eq!(draft("  ", 80000).validate(), Err(IncomeValidationError::EmptyName));
        assert_eq!(
            draft("Arun", 0).validate(),
            Err(IncomeValidationError::NonPositiveAmount)
        );

        let mut huge = draft("Arun", 1);
        huge.amount = Money::from_cents(i64::MAX);
        assert_eq!(huge.validate(), Err(IncomeValidationError::AmountTooLarge));
        huge.amount = Money::MAX;
        assert!(huge.validate().is_ok());
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let id = IncomeId::new();
        let income = Income::from_new(id, draft("Akhil", 70000));

        assert_eq!(income.id, id);
        assert_eq!(income.name, "Akhil");
        assert_eq!(income.amount, Money::from_units(70000));
        assert_eq!(income.month, "March 2026");
    }
}
