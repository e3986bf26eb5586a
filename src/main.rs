use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};

use tally::cli::{
    handle_budget_command, handle_category_command, handle_export_command, handle_import_command,
    handle_report_command, handle_summary_command, handle_transaction_command, BudgetCommands,
    CategoryCommands, ReportCommands, TransactionCommands,
};
use tally::config::paths::TallyPaths;
use tally::models::ReportingGranularity;
use tally::services::MergeMode;
use tally::state::AppState;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Personal income and expense ledger",
    long_about = "Tally records income and expenses, imports and exports them as CSV, \
                  and reports totals, monthly trends, category spending and \
                  remaining budget from the command line."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Show income, expense and balance totals
    Summary,

    /// Charts
    #[command(subcommand)]
    Report(ReportCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Import transactions from CSV
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// "merge" (overlay by id) or "replace" (discard existing)
        #[arg(short, long)]
        mode: Option<MergeMode>,
    },

    /// Export transactions to CSV
    Export {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete all transactions, budgets and categories
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show or change configuration
    Config {
        /// Scope budgets per "monthly" or "daily" period
        #[arg(long)]
        granularity: Option<ReportingGranularity>,
        /// Currency symbol used in output
        #[arg(long)]
        currency: Option<String>,
        /// Default import mode
        #[arg(long)]
        import_mode: Option<MergeMode>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tally::logging::init(cli.verbose);

    let paths = TallyPaths::new()?;
    let mut state = AppState::load(paths)?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&mut state, cmd)?,
        Some(Commands::Summary) => handle_summary_command(&state)?,
        Some(Commands::Report(cmd)) => handle_report_command(&state, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut state, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut state, cmd)?,
        Some(Commands::Import { file, mode }) => handle_import_command(&mut state, &file, mode)?,
        Some(Commands::Export { output }) => handle_export_command(&state, output.as_deref())?,
        Some(Commands::Reset { yes }) => {
            if !yes {
                bail!("Refusing to reset without --yes");
            }
            state.reset_all()?;
            println!("All transactions, budgets and categories have been deleted.");
        }
        Some(Commands::Config {
            granularity,
            currency,
            import_mode,
        }) => {
            if let Some(granularity) = granularity {
                state.set_granularity(granularity)?;
            }
            if let Some(currency) = currency {
                state.set_currency_symbol(&currency)?;
            }
            if let Some(mode) = import_mode {
                state.set_default_import_mode(mode)?;
            }

            let settings = state.settings();
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory: {}", state.paths().base_dir().display());
            println!("Data directory: {}", state.paths().data_dir().display());
            println!();
            println!("Settings:");
            println!("  Granularity:      {}", settings.granularity);
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Import mode:      {}", settings.default_import_mode);
        }
        None => {
            println!("Tally - personal income and expense ledger");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}
