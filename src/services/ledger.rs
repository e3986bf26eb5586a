//! Ledger operations
//!
//! Every function here takes a snapshot of the ledger and returns a new one.
//! Nothing is persisted; that is left to the caller.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};
use crate::models::{Transaction, TransactionDraft, TransactionId};

/// How imported transactions are combined with the existing ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Discard the existing ledger and keep only the incoming records
    Replace,
    /// Overlay incoming records by id; unknown ids are appended
    #[default]
    Merge,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "merge" | "merge-by-id" => Ok(Self::Merge),
            other => Err(format!(
                "Unknown import mode '{}': expected 'merge' or 'replace'",
                other
            )),
        }
    }
}

/// Combine `existing` with `incoming`
///
/// In merge mode the result is `existing` in first-seen order with every
/// incoming record either replacing the entry that shares its id (in place)
/// or appended. Duplicate ids resolve to the last record seen.
pub fn merge(
    existing: &[Transaction],
    incoming: &[Transaction],
    mode: MergeMode,
) -> Vec<Transaction> {
    match mode {
        MergeMode::Replace => incoming.to_vec(),
        MergeMode::Merge => {
            let mut merged: Vec<Transaction> = Vec::with_capacity(existing.len() + incoming.len());
            let mut positions: HashMap<TransactionId, usize> = HashMap::new();
            let mut replaced = 0usize;

            for txn in existing.iter().chain(incoming) {
                match positions.get(&txn.id) {
                    Some(&index) => {
                        merged[index] = txn.clone();
                        replaced += 1;
                    }
                    None => {
                        positions.insert(txn.id.clone(), merged.len());
                        merged.push(txn.clone());
                    }
                }
            }

            tracing::debug!(
                existing = existing.len(),
                incoming = incoming.len(),
                replaced,
                result = merged.len(),
                "merged ledger by id"
            );
            merged
        }
    }
}

/// Find a transaction by id
pub fn find<'a>(ledger: &'a [Transaction], id: &TransactionId) -> Option<&'a Transaction> {
    ledger.iter().find(|t| &t.id == id)
}

/// Append a transaction
pub fn append(ledger: &[Transaction], txn: Transaction) -> Vec<Transaction> {
    let mut updated = ledger.to_vec();
    updated.push(txn);
    updated
}

/// Apply an edit request to the transaction with `id`
///
/// Returns the new ledger and the edited record. The ledger is untouched
/// unless the whole draft validates.
pub fn edit(
    ledger: &[Transaction],
    id: &TransactionId,
    draft: &TransactionDraft,
) -> TallyResult<(Vec<Transaction>, Transaction)> {
    let index = ledger
        .iter()
        .position(|t| &t.id == id)
        .ok_or_else(|| TallyError::transaction_not_found(id.as_str()))?;

    let edited = draft
        .apply_to(&ledger[index])
        .map_err(|e| TallyError::Validation(e.to_string()))?;

    let mut updated = ledger.to_vec();
    updated[index] = edited.clone();
    Ok((updated, edited))
}

/// Remove the transaction with `id`
pub fn remove(
    ledger: &[Transaction],
    id: &TransactionId,
) -> TallyResult<(Vec<Transaction>, Transaction)> {
    let index = ledger
        .iter()
        .position(|t| &t.id == id)
        .ok_or_else(|| TallyError::transaction_not_found(id.as_str()))?;

    let mut updated = ledger.to_vec();
    let removed = updated.remove(index);
    Ok((updated, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, TransactionKind};
    use chrono::NaiveDate;

    fn txn(id: &str, amount: f64) -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            Amount::new(amount).unwrap(),
            "Food",
            "",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .with_id(TransactionId::from(id))
    }

    fn ids(ledger: &[Transaction]) -> Vec<&str> {
        ledger.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_merge_mode_parse() {
        assert_eq!("merge".parse::<MergeMode>().unwrap(), MergeMode::Merge);
        assert_eq!("REPLACE".parse::<MergeMode>().unwrap(), MergeMode::Replace);
        assert!("append".parse::<MergeMode>().is_err());
        assert_eq!(MergeMode::default(), MergeMode::Merge);
    }

    #[test]
    fn test_replace_returns_incoming() {
        let existing = vec![txn("a", 1.0), txn("b", 2.0)];
        let incoming = vec![txn("c", 3.0)];
        assert_eq!(merge(&existing, &incoming, MergeMode::Replace), incoming);
        assert!(merge(&existing, &[], MergeMode::Replace).is_empty());
    }

    #[test]
    fn test_merge_with_empty_incoming_is_identity() {
        let existing = vec![txn("a", 1.0), txn("b", 2.0)];
        assert_eq!(merge(&existing, &[], MergeMode::Merge), existing);
    }

    #[test]
    fn test_merge_overlays_and_appends() {
        let existing = vec![txn("a", 1.0), txn("b", 2.0)];
        let incoming = vec![txn("b", 20.0), txn("c", 3.0)];

        let merged = merge(&existing, &incoming, MergeMode::Merge);
        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
        assert_eq!(merged[1].amount.value(), 20.0);
    }

    #[test]
    fn test_merge_last_write_wins_within_incoming() {
        let incoming = vec![txn("x", 1.0), txn("x", 2.0)];
        let merged = merge(&[], &incoming, MergeMode::Merge);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].amount.value(), 2.0);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = vec![txn("a", 1.0), txn("b", 2.0)];
        let b = vec![txn("b", 5.0), txn("c", 3.0), txn("d", 4.0)];

        let once = merge(&a, &b, MergeMode::Merge);
        let twice = merge(&once, &b, MergeMode::Merge);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_append_and_find() {
        let ledger = append(&[txn("a", 1.0)], txn("b", 2.0));
        assert_eq!(ids(&ledger), vec!["a", "b"]);
        assert!(find(&ledger, &TransactionId::from("b")).is_some());
        assert!(find(&ledger, &TransactionId::from("z")).is_none());
    }

    #[test]
    fn test_edit_in_place() {
        let ledger = vec![txn("a", 1.0), txn("b", 2.0)];
        let draft = TransactionDraft::from_transaction(&ledger[1])
            .amount("9.5")
            .kind("income");

        let (updated, edited) = edit(&ledger, &TransactionId::from("b"), &draft).unwrap();
        assert_eq!(ids(&updated), vec!["a", "b"]);
        assert_eq!(edited.amount.value(), 9.5);
        assert!(updated[1].is_income());
    }

    #[test]
    fn test_edit_rejects_invalid_draft() {
        let ledger = vec![txn("a", 1.0)];
        let draft = TransactionDraft::from_transaction(&ledger[0]).amount("-1");
        let err = edit(&ledger, &TransactionId::from("a"), &draft).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_edit_and_remove_unknown_id() {
        let ledger = vec![txn("a", 1.0)];
        let draft = TransactionDraft::from_transaction(&ledger[0]);
        assert!(edit(&ledger, &TransactionId::from("zzz"), &draft)
            .unwrap_err()
            .is_not_found());
        assert!(remove(&ledger, &TransactionId::from("zzz"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_remove() {
        let ledger = vec![txn("a", 1.0), txn("b", 2.0)];
        let (updated, removed) = remove(&ledger, &TransactionId::from("a")).unwrap();
        assert_eq!(ids(&updated), vec!["b"]);
        assert_eq!(removed.id.as_str(), "a");
    }
}
