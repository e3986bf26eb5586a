//! Category registry
//!
//! The set of known category names used for suggestions. Names are unique
//! ignoring case (the first casing seen is kept) and always sorted
//! case-insensitively.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Deduplicated, case-insensitively sorted category names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl CategoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a saved list plus every category used in the ledger
    ///
    /// Saved casing takes precedence over ledger casing. Blank names are
    /// skipped. Rebuilding an already rebuilt registry changes nothing.
    pub fn rebuild(saved: &[String], ledger: &[Transaction]) -> Self {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        let candidates = saved
            .iter()
            .map(String::as_str)
            .chain(ledger.iter().map(|t| t.category.as_str()));

        for name in candidates {
            let name = name.trim();
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                names.push(name.to_string());
            }
        }

        sort_case_insensitive(&mut names);
        Self { names }
    }

    /// Add a category, returning the updated registry
    ///
    /// Blank names and names already present (ignoring case) leave the
    /// registry unchanged.
    pub fn register(mut self, name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return self;
        }

        tracing::debug!(category = name, "registering category");
        self.names.push(name.to_string());
        sort_case_insensitive(&mut self.names);
        self
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.names.iter().any(|n| n.to_lowercase() == needle)
    }

    /// Names whose lowercase form starts with the lowercase `prefix`
    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.trim().to_lowercase();
        self.names
            .iter()
            .filter(|n| n.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    /// All names in presentation order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn sort_case_insensitive(names: &mut [String]) {
    names.sort_by_cached_key(|n| n.to_lowercase());
}
