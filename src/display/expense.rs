//! Expense display formatting

use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::config::settings::Settings;
use crate::models::{Expense, Income};
use crate::services::aggregation::income_label;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, resolving each income source by name
pub fn format_expense_table(expenses: &[Expense], incomes: &[Income], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.short(),
            date: e.date.format(&settings.date_format).to_string(),
            name: truncate(&e.name, 30),
            category: e.category.display_name().to_string(),
            income: income_label(incomes, e.income_id),
            amount: e.amount.format_with_symbol(&settings.currency_symbol),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string()
}

/// Format one expense with every field
pub fn format_expense_details(expense: &Expense, incomes: &[Income], settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Name:        {}\n", expense.name));
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!(
        "Date:        {}\n",
        expense.date.format(&settings.date_format)
    ));
    output.push_str(&format!(
        "Income:      {}\n",
        income_label(incomes, expense.income_id)
    ));

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseDraft, ExpenseId, IncomeId, Money};
    use chrono::NaiveDate;

    fn rent(income_id: IncomeId) -> Expense {
        Expense::from_draft(
            ExpenseId::new(),
            ExpenseDraft {
                name: "Rent".into(),
                description: "March lease".into(),
                category: ExpenseCategory::CreditCard,
                amount: Money::from_units(15000),
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                income_id,
            },
        )
    }

    #[test]
    fn test_empty_table() {
        let output = format_expense_table(&[], &[], &Settings::default());
        assert_eq!(output, "No expenses found.");
    }

    #[test]
    fn test_table_shows_unknown_income() {
        let expense = rent(IncomeId::new());
        let output = format_expense_table(&[expense.clone()], &[], &Settings::default());

        assert!(output.contains(&expense.id.short()));
        assert!(output.contains("Credit Card"));
        assert!(output.contains("Unknown"));
        assert!(output.contains("₹15000.00"));
        assert!(output.contains("01 Mar 2026"));
    }

    #[test]
    fn test_details() {
        let output = format_expense_details(&rent(IncomeId::new()), &[], &Settings::default());
        assert!(output.contains("Description: March lease"));
        assert!(output.contains("Income:      Unknown"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long expense name", 10), "a very ...");
    }
}
