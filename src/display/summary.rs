//! Monthly summary formatting
//!
//! The three summary cards (income, expenses, remaining) and the per-income
//! spending table.

use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::config::settings::Settings;
use crate::services::aggregation::{BudgetSummary, IncomeRow};
use crate::models::SelectedMonth;

#[derive(Tabled)]
struct IncomeTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Source")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Format the summary cards for a month
pub fn format_summary(month: SelectedMonth, summary: &BudgetSummary, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!("Budget for {}\n", month));
    output.push_str(&format!("{}\n", "=".repeat(32)));
    output.push_str(&format!(
        "Total Income:    {:>14}\n",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total Expenses:  {:>14}\n",
        summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Remaining:       {:>14}\n",
        summary.remaining.format_with_symbol(symbol)
    ));

    if summary.is_overspent() {
        output.push_str("\nSpending exceeds income for this month.\n");
    }

    output
}

/// Format the incomes of a month with what was spent from each
pub fn format_income_table(rows: &[IncomeRow], settings: &Settings) -> String {
    if rows.is_empty() {
        return "No income sources for this month.".to_string();
    }

    let symbol = &settings.currency_symbol;
    let table_rows: Vec<IncomeTableRow> = rows
        .iter()
        .map(|row| IncomeTableRow {
            id: row.income.id.short(),
            name: row.income.name.clone(),
            color: row.income.color.to_string(),
            amount: row.stats.income_amount.format_with_symbol(symbol),
            spent: row.stats.spent.format_with_symbol(symbol),
            remaining: row.stats.remaining.format_with_symbol(symbol),
        })
        .collect();

    Table::new(table_rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Income, IncomeColor, IncomeId, Money, NewIncome};
    use crate::services::aggregation::IncomeStats;

    #[test]
    fn test_summary_cards() {
        let summary = BudgetSummary {
            total_income: Money::from_units(150000),
            total_expenses: Money::from_units(20000),
            remaining: Money::from_units(130000),
        };
        let month = SelectedMonth::new(2026, 3).unwrap();
        let output = format_summary(month, &summary, &Settings::default());

        assert!(output.contains("Budget for March 2026"));
        assert!(output.contains("₹150000.00"));
        assert!(output.contains("₹20000.00"));
        assert!(output.contains("₹130000.00"));
        assert!(!output.contains("exceeds"));
    }

    #[test]
    fn test_overspent_warning() {
        let summary = BudgetSummary {
            total_income: Money::from_units(100),
            total_expenses: Money::from_units(150),
            remaining: Money::from_units(-50),
        };
        let month = SelectedMonth::new(2026, 3).unwrap();
        let output = format_summary(month, &summary, &Settings::default());
        assert!(output.contains("exceeds"));
    }

    #[test]
    fn test_income_table() {
        let income = Income::from_new(
            IncomeId::new(),
            NewIncome {
                name: "Arun".into(),
                amount: Money::from_units(80000),
                color: IncomeColor::Green,
                month: "March 2026".into(),
            },
        );
        let row = IncomeRow {
            income,
            stats: IncomeStats {
                income_amount: Money::from_units(80000),
                spent: Money::from_units(15000),
                remaining: Money::from_units(65000),
            },
        };
        let output = format_income_table(&[row], &Settings::default());

        assert!(output.contains("Arun"));
        assert!(output.contains("green"));
        assert!(output.contains("₹65000.00"));
    }

    #[test]
    fn test_empty_income_table() {
        assert_eq!(
            format_income_table(&[], &Settings::default()),
            "No income sources for this month."
        );
    }
}
