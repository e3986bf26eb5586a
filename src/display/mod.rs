//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display,
//! including currency, bars, and the transaction register.

pub mod report;
pub mod transaction;

pub use report::{format_bar, format_currency, format_percentage};
pub use transaction::{format_transaction_details, format_transaction_register};
