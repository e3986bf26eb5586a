//! CLI commands for reports
//!
//! Summary totals and the two charts.

use clap::Subcommand;

use super::transaction::parse_period;
use crate::error::TallyResult;
use crate::reports::{CategoryBreakdown, MonthlySeries, Summary};
use crate::state::AppState;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income and expenses per month
    Monthly,

    /// Expenses per category
    #[command(alias = "breakdown")]
    Categories {
        /// Restrict to one period (YYYY-MM or YYYY-MM-DD, per granularity)
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Print the summary totals followed by the budget note for the current period
pub fn handle_summary_command(state: &AppState) -> TallyResult<()> {
    let summary = Summary::generate(state.transactions());
    print!("{}", summary.format_terminal(state.currency()));
    println!();
    println!("{}", state.budget_note(None).message(state.currency()));
    Ok(())
}

/// Handle a report command
pub fn handle_report_command(state: &AppState, cmd: ReportCommands) -> TallyResult<()> {
    match cmd {
        ReportCommands::Monthly => {
            let series = MonthlySeries::generate(state.transactions());
            print!("{}", series.format_terminal(state.currency()));
        }
        ReportCommands::Categories { period } => {
            let window = parse_period(state, period.as_deref())?;
            let breakdown = CategoryBreakdown::generate(state.transactions(), window);
            print!("{}", breakdown.format_terminal(state.currency()));
        }
    }

    Ok(())
}
