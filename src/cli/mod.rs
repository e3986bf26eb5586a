//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the application state.

pub mod budget;
pub mod category;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::handle_export_command;
pub use import::handle_import_command;
pub use report::{handle_report_command, handle_summary_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
