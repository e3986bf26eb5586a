//! Storage layer for Tally
//!
//! Persists the three independent records (ledger, budget, category list) as
//! JSON files with atomic writes. Reads never fail: a missing or corrupt
//! record comes back as its empty value.

pub mod file_io;

pub use file_io::{read_json, read_json_or_default, remove_if_exists, write_json_atomic};

use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{ReportingGranularity, Transaction};

/// File-backed persistence for the application records
#[derive(Debug, Clone)]
pub struct Storage {
    paths: TallyPaths,
}

impl Storage {
    /// Create a new Storage instance, ensuring the data directory exists
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    pub fn load_transactions(&self) -> Vec<Transaction> {
        let transactions: Vec<Transaction> =
            read_json_or_default(self.paths.transactions_file());
        tracing::debug!(count = transactions.len(), "loaded transactions");
        transactions
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), TallyError> {
        write_json_atomic(self.paths.transactions_file(), transactions)
    }

    /// Load the budget stored for `granularity`
    ///
    /// Negative values are treated as corrupt and discarded.
    pub fn load_budget(&self, granularity: ReportingGranularity) -> Option<f64> {
        let path = self.paths.budget_file(granularity);
        let budget: Option<f64> = read_json_or_default(&path);

        match budget {
            Some(value) if !value.is_finite() || value < 0.0 => {
                tracing::warn!(path = %path.display(), value, "discarding invalid budget");
                None
            }
            other => other,
        }
    }

    /// Store or clear the budget for `granularity`
    pub fn save_budget(
        &self,
        granularity: ReportingGranularity,
        budget: Option<f64>,
    ) -> Result<(), TallyError> {
        let path = self.paths.budget_file(granularity);
        match budget {
            Some(value) => write_json_atomic(path, &value),
            None => remove_if_exists(path),
        }
    }

    pub fn load_categories(&self) -> Vec<String> {
        read_json_or_default(self.paths.categories_file())
    }

    pub fn save_categories(&self, categories: &[String]) -> Result<(), TallyError> {
        write_json_atomic(self.paths.categories_file(), categories)
    }

    pub fn clear_transactions(&self) -> Result<(), TallyError> {
        remove_if_exists(self.paths.transactions_file())
    }

    pub fn clear_categories(&self) -> Result<(), TallyError> {
        remove_if_exists(self.paths.categories_file())
    }
}
