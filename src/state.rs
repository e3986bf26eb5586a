//! Application state
//!
//! `AppState` is the single owner of the ledger, the budget and the category
//! registry. Every mutation computes the new value with a pure function,
//! persists it, and only then replaces the in-memory copy, so a failed write
//! leaves the previous state in place.

use crate::codec;
use crate::config::{Settings, TallyPaths};
use crate::error::{TallyError, TallyResult};
use crate::models::{
    ReportingGranularity, ReportingPeriod, Transaction, TransactionDraft, TransactionId,
};
use crate::reports::BudgetNote;
use crate::services::{import, ledger, CategoryRegistry, ImportOutcome, MergeMode};
use crate::storage::Storage;

/// Loaded application state
#[derive(Debug)]
pub struct AppState {
    storage: Storage,
    settings: Settings,
    transactions: Vec<Transaction>,
    budget: Option<f64>,
    categories: CategoryRegistry,
}

impl AppState {
    /// Load settings and every persisted record
    ///
    /// The category registry is rebuilt from the saved list and the ledger,
    /// and written back when the rebuild changed it.
    pub fn load(paths: TallyPaths) -> TallyResult<Self> {
        let settings = Settings::load_or_create(&paths);
        let storage = Storage::new(paths)?;

        let transactions = storage.load_transactions();
        let budget = storage.load_budget(settings.granularity);
        let saved = storage.load_categories();
        let categories = CategoryRegistry::rebuild(&saved, &transactions);

        if categories.names() != saved.as_slice() {
            tracing::info!(
                saved = saved.len(),
                rebuilt = categories.len(),
                "category registry rebuilt"
            );
            storage.save_categories(categories.names())?;
        }

        Ok(Self {
            storage,
            settings,
            transactions,
            budget,
            categories,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn granularity(&self) -> ReportingGranularity {
        self.settings.granularity
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn paths(&self) -> &TallyPaths {
        self.storage.paths()
    }

    /// Validate a draft and append it to the ledger
    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> TallyResult<Transaction> {
        let txn = draft
            .build()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        let transactions = ledger::append(&self.transactions, txn.clone());
        let categories = self.categories.clone().register(&txn.category);
        self.commit(transactions, categories)?;

        tracing::info!(id = %txn.id, "transaction added");
        Ok(txn)
    }

    /// Apply a complete edit request to an existing transaction
    pub fn edit_transaction(
        &mut self,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> TallyResult<Transaction> {
        let (transactions, edited) = ledger::edit(&self.transactions, id, draft)?;
        let categories = self.categories.clone().register(&edited.category);
        self.commit(transactions, categories)?;

        tracing::info!(id = %edited.id, "transaction edited");
        Ok(edited)
    }

    pub fn delete_transaction(&mut self, id: &TransactionId) -> TallyResult<Transaction> {
        let (transactions, removed) = ledger::remove(&self.transactions, id)?;
        let categories = self.categories.clone();
        self.commit(transactions, categories)?;

        tracing::info!(id = %removed.id, "transaction deleted");
        Ok(removed)
    }

    /// Import CSV text, registering every incoming category
    pub fn import_csv(&mut self, text: &str, mode: MergeMode) -> TallyResult<ImportOutcome> {
        let outcome = import::import_csv(text, &self.transactions, mode)?;

        let categories = outcome
            .incoming
            .iter()
            .fold(self.categories.clone(), |reg, txn| reg.register(&txn.category));
        self.commit(outcome.ledger.clone(), categories)?;

        Ok(outcome)
    }

    /// The ledger as canonical CSV text
    pub fn export_csv(&self) -> String {
        codec::serialize(&self.transactions)
    }

    /// Set the budget for the current granularity
    pub fn set_budget(&mut self, value: f64) -> TallyResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(TallyError::Validation(format!(
                "Budget must be a non-negative number, got {}",
                value
            )));
        }

        self.storage.save_budget(self.granularity(), Some(value))?;
        self.budget = Some(value);
        tracing::info!(value, granularity = %self.granularity(), "budget set");
        Ok(())
    }

    pub fn clear_budget(&mut self) -> TallyResult<()> {
        self.storage.save_budget(self.granularity(), None)?;
        self.budget = None;
        tracing::info!(granularity = %self.granularity(), "budget cleared");
        Ok(())
    }

    /// Switch granularity, loading the budget stored for the new one
    pub fn set_granularity(&mut self, granularity: ReportingGranularity) -> TallyResult<()> {
        let settings = Settings {
            granularity,
            ..self.settings.clone()
        };
        settings.save(self.storage.paths())?;

        self.budget = self.storage.load_budget(granularity);
        self.settings = settings;
        Ok(())
    }

    pub fn set_currency_symbol(&mut self, symbol: &str) -> TallyResult<()> {
        let settings = Settings {
            currency_symbol: symbol.to_string(),
            ..self.settings.clone()
        };
        settings.save(self.storage.paths())?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_default_import_mode(&mut self, mode: MergeMode) -> TallyResult<()> {
        let settings = Settings {
            default_import_mode: mode,
            ..self.settings.clone()
        };
        settings.save(self.storage.paths())?;
        self.settings = settings;
        Ok(())
    }

    /// Register a category by hand
    ///
    /// Returns `false` when the name was blank or already present.
    pub fn add_category(&mut self, name: &str) -> TallyResult<bool> {
        let categories = self.categories.clone().register(name);
        if categories == self.categories {
            return Ok(false);
        }

        self.storage.save_categories(categories.names())?;
        self.categories = categories;
        Ok(true)
    }

    /// Rebuild the registry from the saved list and the ledger
    pub fn rebuild_categories(&mut self) -> TallyResult<()> {
        let categories = CategoryRegistry::rebuild(self.categories.names(), &self.transactions);
        self.storage.save_categories(categories.names())?;
        self.categories = categories;
        Ok(())
    }

    /// Clear ledger, budgets and categories
    ///
    /// Records are removed one at a time and each is cleared in memory only
    /// once its file is gone. On failure the remaining records are left
    /// untouched on disk and in memory.
    pub fn reset_all(&mut self) -> TallyResult<()> {
        let current = self.granularity();
        let other = match current {
            ReportingGranularity::Monthly => ReportingGranularity::Daily,
            ReportingGranularity::Daily => ReportingGranularity::Monthly,
        };

        self.storage
            .clear_transactions()
            .inspect_err(|e| tracing::warn!(record = "transactions", error = %e, "reset failed"))?;
        self.transactions.clear();

        self.storage
            .save_budget(current, None)
            .inspect_err(|e| tracing::warn!(record = "budget", error = %e, "reset failed"))?;
        self.budget = None;
        self.storage
            .save_budget(other, None)
            .inspect_err(|e| tracing::warn!(record = "budget", error = %e, "reset failed"))?;

        self.storage
            .clear_categories()
            .inspect_err(|e| tracing::warn!(record = "categories", error = %e, "reset failed"))?;
        self.categories = CategoryRegistry::new();
        tracing::info!("all data reset");
        Ok(())
    }

    /// Budget note for `period`, or for the current period when `None`
    pub fn budget_note(&self, period: Option<ReportingPeriod>) -> BudgetNote {
        let period = period.unwrap_or_else(|| ReportingPeriod::current(self.granularity()));
        BudgetNote::evaluate(&self.transactions, self.budget, period)
    }

    fn commit(
        &mut self,
        transactions: Vec<Transaction>,
        categories: CategoryRegistry,
    ) -> TallyResult<()> {
        self.storage.save_transactions(&transactions)?;
        if categories != self.categories {
            self.storage.save_categories(categories.names())?;
        }
        self.transactions = transactions;
        self.categories = categories;
        Ok(())
    }
}
