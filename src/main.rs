use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use budgetiq::cli::{
    handle_expense_command, handle_export_command, handle_income_command, handle_login,
    handle_logout, handle_register, handle_summary_command, handle_whoami, Credentials,
    ExpenseCommands, ExportArgs, IncomeCommands, SummaryArgs,
};
use budgetiq::config::{paths::BudgetPaths, settings::Settings};
use budgetiq::session::{LocalSessionProvider, SessionProvider};
use budgetiq::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetiq",
    author = "Kaylee Beyene",
    version,
    about = "Month-scoped personal budget tracker",
    long_about = "BudgetIQ records income sources and categorized expenses per \
                  month, shows what is left of each income, and exports the \
                  month's expenses to a spreadsheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register(Credentials),

    /// Sign in
    Login(Credentials),

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Income source commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show the month's totals and per-income spending
    Summary(SummaryArgs),

    /// Export the month's expenses to a spreadsheet
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    paths.ensure_directories()?;
    let provider = LocalSessionProvider::new(paths.clone());

    match cli.command {
        Some(Commands::Register(credentials)) => handle_register(&provider, credentials)?,
        Some(Commands::Login(credentials)) => handle_login(&provider, credentials)?,
        Some(Commands::Logout) => handle_logout(&provider)?,
        Some(Commands::Whoami) => handle_whoami(&provider)?,
        Some(Commands::Config) => {
            println!("BudgetIQ Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Reference year:  {}", settings.effective_year());
            println!("  Log level:       {}", settings.log_level);
            println!("  Export file:     {}", settings.export_file_name);
        }
        Some(Commands::Income(cmd)) => {
            let storage = open_budget(&provider, &paths)?;
            handle_income_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let storage = open_budget(&provider, &paths)?;
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Summary(args)) => {
            let storage = open_budget(&provider, &paths)?;
            handle_summary_command(&storage, &settings, args)?;
        }
        Some(Commands::Export(args)) => {
            let storage = open_budget(&provider, &paths)?;
            handle_export_command(&storage, &settings, args)?;
        }
        None => {
            println!("BudgetIQ - Month-scoped personal budget tracker");
            println!();
            println!("Run 'budgetiq --help' for usage information.");
        }
    }

    Ok(())
}

/// Open the record store, refusing when nobody is signed in
fn open_budget(provider: &LocalSessionProvider, paths: &BudgetPaths) -> Result<Storage> {
    if !provider.is_authenticated() {
        bail!("Not logged in. Run 'budgetiq login <email>' first.");
    }
    Ok(Storage::open(paths.clone())?)
}
