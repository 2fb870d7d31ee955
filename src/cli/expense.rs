//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing and deleting
//! expenses.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryTab, Expense, ExpenseCategory, SelectedMonth};
use crate::services::{Dashboard, ExpenseForm, MonthSelector, Outcome, RecordEditor};
use crate::storage::Storage;

use super::{parse_amount, resolve_month, single_match};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Expense name (e.g., "Rent")
        name: String,

        /// Amount (e.g., "15000" or "15000.00")
        amount: String,

        /// Income source the expense is paid from (name or ID)
        #[arg(short, long)]
        income: String,

        /// Category: loans, groceries, creditCard or lifestyle
        #[arg(short, long, default_value = "loans")]
        category: ExpenseCategory,

        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,

        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List the expenses of a month
    #[command(alias = "ls")]
    List {
        /// Month ("March" or "March 2026"; defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only show expenses whose name or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Category tab: all, loans, groceries, creditCard or lifestyle
        #[arg(short, long, default_value = "all")]
        category: CategoryTab,
    },

    /// Show one expense
    Show {
        /// Expense ID (full, short form, or prefix)
        id: String,
    },

    /// Replace the fields of an expense
    Edit {
        /// Expense ID (full, short form, or prefix)
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New income source (name or ID)
        #[arg(short, long)]
        income: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<ExpenseCategory>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full, short form, or prefix)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let selector = MonthSelector::from_settings(settings);

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            income,
            category,
            description,
            date,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let amount = parse_amount(&amount)?;

            let mut dashboard = Dashboard::open(storage, selector, SelectedMonth::containing(date))?;
            let income = dashboard.find_income(&income)?;

            let state = dashboard.editor_state_mut();
            state.expense_dialog_open = true;
            state.expense_form = ExpenseForm {
                name,
                description: description.unwrap_or_default(),
                category,
                amount,
                date,
                income_id: Some(income.id),
            };

            match dashboard.create_expense()? {
                Outcome::Accepted(expense) => println!(
                    "Added expense '{}' of {} from {} [{}]",
                    expense.name,
                    expense.amount.format_with_symbol(&settings.currency_symbol),
                    income.name,
                    expense.id.short()
                ),
                Outcome::Rejected(reason) => return Err(BudgetError::Validation(reason)),
            }
        }

        ExpenseCommands::List {
            month,
            search,
            category,
        } => {
            let month = resolve_month(&selector, month.as_deref())?;
            let mut dashboard = Dashboard::open(storage, selector, month)?;
            if let Some(query) = search {
                dashboard.set_search_query(query);
            }

            let expenses = dashboard.expenses_in_tab(category);
            let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();

            println!("{} for {}", category, month);
            println!(
                "{}",
                format_expense_table(&expenses, dashboard.incomes(), settings)
            );
            println!(
                "Total: {}",
                total.format_with_symbol(&settings.currency_symbol)
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = find_expense(storage, &id)?;
            let dashboard =
                Dashboard::open(storage, selector, SelectedMonth::containing(expense.date))?;
            print!(
                "{}",
                format_expense_details(&expense, dashboard.incomes(), settings)
            );
        }

        ExpenseCommands::Edit {
            id,
            name,
            amount,
            income,
            category,
            description,
            date,
        } => {
            let expense = find_expense(storage, &id)?;
            let date = date.unwrap_or(expense.date);
            let amount = amount.as_deref().map(parse_amount).transpose()?;

            let mut dashboard = Dashboard::open(storage, selector, SelectedMonth::containing(date))?;
            let income_id = match income {
                Some(income) => Some(dashboard.find_income(&income)?.id),
                None => None,
            };

            dashboard.begin_edit(&expense);
            let form = &mut dashboard.editor_state_mut().expense_form;
            form.date = date;
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(income_id) = income_id {
                form.income_id = Some(income_id);
            }

            match dashboard.commit_edit()? {
                Outcome::Accepted(updated) => {
                    println!("Updated expense {}", updated.id.short());
                    print!(
                        "{}",
                        format_expense_details(&updated, dashboard.incomes(), settings)
                    );
                }
                Outcome::Rejected(reason) => return Err(BudgetError::Validation(reason)),
            }
        }

        ExpenseCommands::Delete { id } => {
            let expense = find_expense(storage, &id)?;
            RecordEditor::new(storage).delete_expense(expense.id)?;
            println!("Deleted expense '{}' [{}]", expense.name, expense.id.short());
        }
    }

    Ok(())
}

/// Find an expense in any month by full, short or prefix id
fn find_expense(storage: &Storage, id: &str) -> BudgetResult<Expense> {
    let matches = storage
        .expenses
        .get_all()?
        .into_iter()
        .filter(|e| e.id.matches(id))
        .collect();
    single_match(matches, id, || BudgetError::expense_not_found(id))
}
