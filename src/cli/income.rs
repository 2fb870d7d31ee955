//! Income CLI commands
//!
//! Implements CLI commands for the income sources of a month.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_income_table;
use crate::error::{BudgetError, BudgetResult};
use crate::services::{Dashboard, IncomeForm, MonthSelector, Outcome, RecordEditor};
use crate::storage::Storage;

use super::{parse_amount, resolve_month, single_match};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income source to a month
    Add {
        /// Income source name (e.g., "Salary")
        name: String,

        /// Amount (e.g., "80000" or "80000.50")
        amount: String,

        /// Month ("March" or "March 2026"; defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List the income sources of a month
    List {
        /// Month ("March" or "March 2026"; defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove an income source
    #[command(alias = "rm")]
    Remove {
        /// Income ID (full, short form, or prefix)
        id: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> BudgetResult<()> {
    let selector = MonthSelector::from_settings(settings);

    match cmd {
        IncomeCommands::Add {
            name,
            amount,
            month,
        } => {
            let month = resolve_month(&selector, month.as_deref())?;
            let amount = parse_amount(&amount)?;

            let mut dashboard = Dashboard::open(storage, selector, month)?;
            dashboard.editor_state_mut().income_form = IncomeForm { name, amount };

            match dashboard.create_income()? {
                Outcome::Accepted(income) => println!(
                    "Added income '{}' of {} for {} [{}]",
                    income.name,
                    income.amount.format_with_symbol(&settings.currency_symbol),
                    income.month,
                    income.id.short()
                ),
                Outcome::Rejected(reason) => return Err(BudgetError::Validation(reason)),
            }
        }

        IncomeCommands::List { month } => {
            let month = resolve_month(&selector, month.as_deref())?;
            let dashboard = Dashboard::open(storage, selector, month)?;
            let view = dashboard.view();

            println!("Income for {}", month);
            println!("{}", format_income_table(&view.incomes, settings));
            println!(
                "Total: {}",
                view.summary
                    .total_income
                    .format_with_symbol(&settings.currency_symbol)
            );
        }

        IncomeCommands::Remove { id } => {
            let matches = storage
                .incomes
                .get_all()?
                .into_iter()
                .filter(|i| i.id.matches(&id))
                .collect();
            let income = single_match(matches, &id, || BudgetError::income_not_found(&id))?;

            RecordEditor::new(storage).delete_income(income.id)?;
            println!("Removed income '{}' from {}", income.name, income.month);
        }
    }

    Ok(())
}
