//! Summary CLI command

use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_income_table, format_summary};
use crate::error::BudgetResult;
use crate::services::{Dashboard, MonthSelector};
use crate::storage::Storage;

use super::resolve_month;

/// Arguments of `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Month ("March" or "March 2026"; defaults to the current month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Only count expenses whose name or description contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Handle `summary`: the summary cards followed by per-income spending
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> BudgetResult<()> {
    let selector = MonthSelector::from_settings(settings);
    let month = resolve_month(&selector, args.month.as_deref())?;

    let mut dashboard = Dashboard::open(storage, selector, month)?;
    if let Some(query) = args.search {
        dashboard.set_search_query(query);
    }
    let view = dashboard.view();

    print!("{}", format_summary(month, &view.summary, settings));
    if !view.query.is_empty() {
        println!("(expenses matching \"{}\")", view.query);
    }
    println!();
    println!("{}", format_income_table(&view.incomes, settings));

    Ok(())
}
