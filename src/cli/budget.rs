//! Budget CLI commands
//!
//! The budget is a single amount per reporting granularity.

use clap::Subcommand;

use super::transaction::parse_period;
use crate::display::format_currency;
use crate::error::TallyResult;
use crate::reports::BudgetNote;
use crate::state::AppState;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the budget for the current granularity
    Set {
        /// Budget amount (zero or more)
        #[arg(allow_hyphen_values = true)]
        amount: f64,
    },

    /// Remove the budget for the current granularity
    Clear,

    /// Show remaining budget for a period (defaults to the current one)
    Show {
        /// Period (YYYY-MM or YYYY-MM-DD, per granularity)
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(state: &mut AppState, cmd: BudgetCommands) -> TallyResult<()> {
    match cmd {
        BudgetCommands::Set { amount } => {
            state.set_budget(amount)?;
            println!(
                "{} budget set to {}",
                capitalize(state.granularity().as_str()),
                format_currency(amount, state.currency())
            );
        }

        BudgetCommands::Clear => {
            state.clear_budget()?;
            println!("{} budget cleared", capitalize(state.granularity().as_str()));
        }

        BudgetCommands::Show { period } => {
            let period = parse_period(state, period.as_deref())?;
            let note = state.budget_note(period);
            let currency = state.currency();

            if let BudgetNote::Tracked { budget, spent, .. } = note {
                println!("Period: {}", note.period());
                println!("Budget: {}", format_currency(budget, currency));
                println!("Spent:  {}", format_currency(spent, currency));
                println!();
            }
            println!("{}", note.message(currency));
        }
    }

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
