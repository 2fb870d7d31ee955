//! Expense categories and the category tab filter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseCategory {
    #[default]
    Loans,
    Groceries,
    CreditCard,
    Lifestyle,
}

impl ExpenseCategory {
    /// The stored tag, as written to the record store and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loans => "loans",
            Self::Groceries => "groceries",
            Self::CreditCard => "creditCard",
            Self::Lifestyle => "lifestyle",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loans => "Loans",
            Self::Groceries => "Groceries",
            Self::CreditCard => "Credit Card",
            Self::Lifestyle => "Lifestyle",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "loans" | "loan" => Ok(Self::Loans),
            "groceries" | "grocery" => Ok(Self::Groceries),
            "creditcard" => Ok(Self::CreditCard),
            "lifestyle" => Ok(Self::Lifestyle),
            _ => Err(format!(
                "Unknown category '{}'. Expected one of: loans, groceries, creditCard, lifestyle",
                s
            )),
        }
    }
}

/// A category tab in the expense list; `All` keeps every expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryTab {
    #[default]
    All,
    Only(ExpenseCategory),
}

impl CategoryTab {
    /// Every tab, in display order
    pub fn tabs() -> [CategoryTab; 5] {
        [
            Self::All,
            Self::Only(ExpenseCategory::Loans),
            Self::Only(ExpenseCategory::Groceries),
            Self::Only(ExpenseCategory::CreditCard),
            Self::Only(ExpenseCategory::Lifestyle),
        ]
    }

    pub fn includes(&self, category: ExpenseCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => *only == category,
        }
    }
}

impl fmt::Display for CategoryTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.pad("All Expenses"),
            Self::Only(category) => fmt::Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&ExpenseCategory::CreditCard).unwrap();
        assert_eq!(json, "\"creditCard\"");

        let parsed: ExpenseCategory = serde_json::from_str("\"groceries\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::Groceries);
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("creditCard".parse(), Ok(ExpenseCategory::CreditCard));
        assert_eq!("credit-card".parse(), Ok(ExpenseCategory::CreditCard));
        assert_eq!("LOANS".parse(), Ok(ExpenseCategory::Loans));
        assert!("rent".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_tab_includes() {
        assert!(CategoryTab::All.includes(ExpenseCategory::Lifestyle));
        assert!(CategoryTab::Only(ExpenseCategory::Loans).includes(ExpenseCategory::Loans));
        assert!(!CategoryTab::Only(ExpenseCategory::Loans).includes(ExpenseCategory::Groceries));
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("all".parse(), Ok(CategoryTab::All));
        assert_eq!(
            "lifestyle".parse(),
            Ok(CategoryTab::Only(ExpenseCategory::Lifestyle))
        );
    }
}
