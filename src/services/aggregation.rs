//! Month-scoped aggregation
//!
//! Pure functions over the income and expense snapshots of a selected month:
//! search filtering, totals, per-income spending and category tabs. Nothing
//! here touches storage, so the same inputs always give the same outputs.

use serde::Serialize;

use crate::models::{CategoryTab, Expense, Income, IncomeId, Money, SelectedMonth};

/// Label shown for an expense whose income source no longer resolves
pub const UNKNOWN_INCOME_LABEL: &str = "Unknown";

/// Expenses dated within `month` whose name or description contains `query`
/// (case-insensitive), in arrival order
pub fn filter_expenses(expenses: &[Expense], month: SelectedMonth, query: &str) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| month.contains(e.date) && e.matches_query(query))
        .cloned()
        .collect()
}

/// Sum of every income of the month; search never applies to incomes
pub fn total_income(incomes: &[Income]) -> Money {
    incomes.iter().map(|i| i.amount).sum()
}

/// Sum of the already filtered expenses
pub fn total_expenses(filtered: &[Expense]) -> Money {
    filtered.iter().map(|e| e.amount).sum()
}

/// The three summary cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub remaining: Money,
}

impl BudgetSummary {
    pub fn compute(incomes: &[Income], filtered: &[Expense]) -> Self {
        let total_income = total_income(incomes);
        let total_expenses = total_expenses(filtered);
        Self {
            total_income,
            total_expenses,
            remaining: total_income - total_expenses,
        }
    }

    /// Whether spending exceeds income
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Spending drawn against one income source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeStats {
    pub income_amount: Money,
    pub spent: Money,
    pub remaining: Money,
}

/// Stats for one income; an unknown id counts as an income of zero
pub fn income_stats(incomes: &[Income], filtered: &[Expense], income_id: IncomeId) -> IncomeStats {
    let income_amount = incomes
        .iter()
        .find(|i| i.id == income_id)
        .map(|i| i.amount)
        .unwrap_or_default();

    let spent = filtered
        .iter()
        .filter(|e| e.income_id == income_id)
        .map(|e| e.amount)
        .sum();

    IncomeStats {
        income_amount,
        spent,
        remaining: income_amount - spent,
    }
}

/// Expenses visible under a category tab, order preserved
pub fn by_category(filtered: &[Expense], tab: CategoryTab) -> Vec<Expense> {
    filtered
        .iter()
        .filter(|e| tab.includes(e.category))
        .cloned()
        .collect()
}

/// Name of the income an expense draws from, or "Unknown"
pub fn income_label(incomes: &[Income], income_id: IncomeId) -> String {
    incomes
        .iter()
        .find(|i| i.id == income_id)
        .map(|i| i.name.clone())
        .unwrap_or_else(|| UNKNOWN_INCOME_LABEL.to_string())
}

/// Per-income row of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeRow {
    pub income: Income,
    pub stats: IncomeStats,
}

/// Everything the dashboard renders for one month and query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub month: SelectedMonth,
    pub query: String,
    pub expenses: Vec<Expense>,
    pub summary: BudgetSummary,
    pub incomes: Vec<IncomeRow>,
}

impl DashboardView {
    pub fn compute(
        incomes: &[Income],
        expenses: &[Expense],
        month: SelectedMonth,
        query: &str,
    ) -> Self {
        let filtered = filter_expenses(expenses, month, query);
        let summary = BudgetSummary::compute(incomes, &filtered);
        let rows = incomes
            .iter()
            .map(|income| IncomeRow {
                stats: income_stats(incomes, &filtered, income.id),
                income: income.clone(),
            })
            .collect();

        Self {
            month,
            query: query.to_string(),
            expenses: filtered,
            summary,
            incomes: rows,
        }
    }

    /// Visible expenses under a category tab
    pub fn in_tab(&self, tab: CategoryTab) -> Vec<Expense> {
        by_category(&self.expenses, tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseDraft, ExpenseId, IncomeColor, NewIncome};
    use chrono::NaiveDate;

    fn march() -> SelectedMonth {
        SelectedMonth::new(2026, 3).unwrap()
    }

    fn income(name: &str, units: i64) -> Income {
        Income::from_new(
            IncomeId::new(),
            NewIncome {
                name: name.into(),
                amount: Money::from_units(units),
                color: IncomeColor::Red,
                month: "March 2026".into(),
            },
        )
    }

    fn expense(
        name: &str,
        units: i64,
        category: ExpenseCategory,
        income_id: IncomeId,
        date: NaiveDate,
    ) -> Expense {
        Expense::from_draft(
            ExpenseId::new(),
            ExpenseDraft {
                name: name.into(),
                description: String::new(),
                category,
                amount: Money::from_units(units),
                date,
                income_id,
            },
        )
    }

    struct Scenario {
        arun: Income,
        akhil: Income,
        incomes: Vec<Income>,
        expenses: Vec<Expense>,
    }

    fn scenario() -> Scenario {
        let arun = income("Arun", 80000);
        let akhil = income("Akhil", 70000);
        let expenses = vec![
            expense(
                "Rent",
                15000,
                ExpenseCategory::Loans,
                arun.id,
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            ),
            expense(
                "Groceries",
                5000,
                ExpenseCategory::Groceries,
                akhil.id,
                NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            ),
        ];
        Scenario {
            incomes: vec![arun.clone(), akhil.clone()],
            arun,
            akhil,
            expenses,
        }
    }

    #[test]
    fn test_summary_for_two_incomes() {
        let s = scenario();
        let view = DashboardView::compute(&s.incomes, &s.expenses, march(), "");

        assert_eq!(view.summary.total_income.to_string(), "150000.00");
        assert_eq!(view.summary.total_expenses.to_string(), "20000.00");
        assert_eq!(view.summary.remaining.to_string(), "130000.00");

        let arun = income_stats(&s.incomes, &view.expenses, s.arun.id);
        assert_eq!(arun.spent, Money::from_units(15000));
        assert_eq!(arun.remaining, Money::from_units(65000));

        let akhil = income_stats(&s.incomes, &view.expenses, s.akhil.id);
        assert_eq!(akhil.remaining, Money::from_units(65000));
    }

    #[test]
    fn test_loans_tab_shows_only_rent() {
        let s = scenario();
        let view = DashboardView::compute(&s.incomes, &s.expenses, march(), "");
        let loans = view.in_tab(CategoryTab::Only(ExpenseCategory::Loans));

        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].name, "Rent");
        assert_eq!(view.in_tab(CategoryTab::All), view.expenses);
    }

    #[test]
    fn test_unmatched_query_leaves_income_alone() {
        let s = scenario();
        let view = DashboardView::compute(&s.incomes, &s.expenses, march(), "xyz");

        assert!(view.expenses.is_empty());
        assert_eq!(view.summary.total_expenses.to_string(), "0.00");
        assert_eq!(view.summary.total_income, Money::from_units(150000));
    }

    #[test]
    fn test_query_matches_description() {
        let s = scenario();
        let mut expenses = s.expenses.clone();
        expenses[1].description = "Weekly vegetables".into();

        let filtered = filter_expenses(&expenses, march(), "VEGETABLES");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Groceries");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let s = scenario();
        let once = filter_expenses(&s.expenses, march(), "re");
        let twice = filter_expenses(&once, march(), "re");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remaining_identity_holds() {
        let s = scenario();
        for query in ["", "rent", "xyz"] {
            let filtered = filter_expenses(&s.expenses, march(), query);
            let summary = BudgetSummary::compute(&s.incomes, &filtered);
            assert_eq!(
                summary.total_income - summary.total_expenses,
                summary.remaining
            );
        }
    }

    #[test]
    fn test_out_of_month_expenses_are_dropped() {
        let s = scenario();
        let mut expenses = s.expenses.clone();
        expenses.push(expense(
            "April rent",
            15000,
            ExpenseCategory::Loans,
            s.arun.id,
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        ));

        let filtered = filter_expenses(&expenses, march(), "");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_overspending_goes_negative() {
        let s = scenario();
        let big = vec![expense(
            "Car",
            200000,
            ExpenseCategory::Loans,
            s.arun.id,
            NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        )];
        let summary = BudgetSummary::compute(&s.incomes, &big);

        assert!(summary.is_overspent());
        assert_eq!(summary.remaining, Money::from_units(-50000));
    }

    #[test]
    fn test_unknown_income() {
        let s = scenario();
        let missing = IncomeId::new();

        assert_eq!(income_label(&s.incomes, missing), UNKNOWN_INCOME_LABEL);
        assert_eq!(income_label(&s.incomes, s.arun.id), "Arun");

        let stats = income_stats(&s.incomes, &s.expenses, missing);
        assert_eq!(stats.income_amount, Money::zero());
        assert_eq!(stats.spent, Money::zero());
    }
}
