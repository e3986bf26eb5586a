//! Tally - a personal income and expense ledger
//!
//! This library provides the core of the Tally command-line ledger: CSV
//! import and export, merging imported records into the ledger, summary and
//! chart aggregations, a per-period budget, and a category registry.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic logging setup
//! - `models`: Core data models (transactions, amounts, periods)
//! - `codec`: CSV serialization and parsing
//! - `services`: Import normalization, ledger merging, category registry
//! - `reports`: Pure aggregations over a ledger snapshot
//! - `storage`: JSON file storage layer
//! - `state`: The single owner of the loaded ledger, budget and categories
//! - `display` / `cli`: Terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::paths::TallyPaths;
//! use tally::state::AppState;
//!
//! let paths = TallyPaths::new()?;
//! let state = AppState::load(paths)?;
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{TallyError, TallyResult};
