//! Core data models for Tally
//!
//! This module contains the data structures that represent the ledger
//! domain: transactions, their identifiers and amounts, and reporting periods.

pub mod amount;
pub mod ids;
pub mod period;
pub mod transaction;

pub use amount::{Amount, AmountError};
pub use ids::TransactionId;
pub use period::{ReportingGranularity, ReportingPeriod};
pub use transaction::{
    Transaction, TransactionDraft, TransactionKind, TransactionValidationError, DEFAULT_CATEGORY,
};
