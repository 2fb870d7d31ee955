//! Export CLI command
//!
//! Writes the expenses of a month to a spreadsheet in the chosen directory.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::export_expenses_csv;
use crate::services::{Dashboard, MonthSelector};
use crate::storage::Storage;

use super::resolve_month;

/// Spreadsheet format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

/// Arguments of `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Month ("March" or "March 2026"; defaults to the current month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Directory to write into (defaults to the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Xlsx)]
    pub format: ExportFormat,
}

/// Handle `export`
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> BudgetResult<()> {
    let selector = MonthSelector::from_settings(settings);
    let month = resolve_month(&selector, args.month.as_deref())?;
    let dir = args.output.unwrap_or_else(|| PathBuf::from("."));

    if !dir.is_dir() {
        return Err(BudgetError::Export(format!(
            "Output directory does not exist: {}",
            dir.display()
        )));
    }

    let dashboard = Dashboard::open(storage, selector, month)?;
    let path = match args.format {
        ExportFormat::Xlsx => dashboard.export_xlsx(&dir, &settings.export_file_name)?,
        ExportFormat::Csv => {
            let path = dir.join(Path::new(&settings.export_file_name).with_extension("csv"));
            let file = File::create(&path).map_err(|e| {
                BudgetError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            export_expenses_csv(dashboard.expenses(), BufWriter::new(file))?;
            path
        }
    };

    println!(
        "Exported {} expenses for {} to {}",
        dashboard.expenses().len(),
        month,
        path.display()
    );
    Ok(())
}
