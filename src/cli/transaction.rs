//! Transaction CLI commands
//!
//! Add, edit, delete and list ledger entries.

use clap::Subcommand;

use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{TallyError, TallyResult};
use crate::models::{ReportingPeriod, TransactionDraft, TransactionId};
use crate::reports::{filter_register, RegisterFilter};
use crate::services::ledger;
use crate::state::AppState;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount (e.g. "42.50"); must be greater than zero
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// "income" or "expense"
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Category name (defaults to "Other")
        #[arg(short, long)]
        category: Option<String>,
        /// Free-text description
        #[arg(short, long)]
        desc: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit a transaction; omitted fields keep their current values
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        desc: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: String,
    },

    /// List transactions, newest first
    #[command(alias = "ls")]
    List {
        /// Filter by text in category or description
        #[arg(short, long)]
        query: Option<String>,
        /// Restrict to one period (YYYY-MM or YYYY-MM-DD, per granularity)
        #[arg(short, long)]
        period: Option<String>,
        /// Show at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    state: &mut AppState,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            kind,
            category,
            desc,
            date,
        } => {
            let draft = TransactionDraft {
                kind: Some(kind),
                amount: Some(amount),
                category,
                desc,
                date: Some(date.unwrap_or_else(today)),
            };

            let txn = state.add_transaction(&draft)?;
            println!("Added transaction");
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            desc,
            date,
        } => {
            let id = TransactionId::from(id.as_str());
            let existing = ledger::find(state.transactions(), &id)
                .ok_or_else(|| TallyError::transaction_not_found(id.as_str()))?;

            let mut draft = TransactionDraft::from_transaction(existing);
            if kind.is_some() {
                draft.kind = kind;
            }
            if amount.is_some() {
                draft.amount = amount;
            }
            if category.is_some() {
                draft.category = category;
            }
            if desc.is_some() {
                draft.desc = desc;
            }
            if date.is_some() {
                draft.date = date;
            }

            let txn = state.edit_transaction(&id, &draft)?;
            println!("Updated transaction");
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Delete { id } => {
            let removed = state.delete_transaction(&TransactionId::from(id.as_str()))?;
            println!("Deleted transaction: {}", removed);
        }

        TransactionCommands::List {
            query,
            period,
            limit,
        } => {
            let filter = RegisterFilter {
                query,
                period: parse_period(state, period.as_deref())?,
            };

            let mut rows = filter_register(state.transactions(), &filter);
            if let Some(limit) = limit {
                rows.truncate(limit);
            }
            print!("{}", format_transaction_register(&rows));
        }
    }

    Ok(())
}

/// Parse an optional period argument using the configured granularity
pub(crate) fn parse_period(
    state: &AppState,
    raw: Option<&str>,
) -> TallyResult<Option<ReportingPeriod>> {
    raw.map(|s| ReportingPeriod::parse(state.granularity(), s).map_err(TallyError::Validation))
        .transpose()
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
