//! Transaction Register Report
//!
//! The filtered, newest-first transaction list shown by `list`.

use crate::models::{ReportingPeriod, Transaction};

/// Filter options for the register
#[derive(Debug, Clone, Default)]
pub struct RegisterFilter {
    /// Case-insensitive substring over "category description"
    pub query: Option<String>,
    /// Restrict to one reporting period
    pub period: Option<ReportingPeriod>,
}

impl RegisterFilter {
    /// Check if a transaction matches this filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(period) = &self.period {
            if !period.contains(txn.date) {
                return false;
            }
        }

        match &self.query {
            Some(query) => txn.matches_query(query),
            None => true,
        }
    }
}

/// Apply `filter` and sort by date, newest first
///
/// Transactions sharing a date keep their ledger order.
pub fn filter_register(ledger: &[Transaction], filter: &RegisterFilter) -> Vec<Transaction> {
    let mut rows: Vec<Transaction> = ledger
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, TransactionId, TransactionKind};
    use chrono::NaiveDate;

    fn txn(id: &str, category: &str, desc: &str, date: &str) -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            Amount::new(10.0).unwrap(),
            category,
            desc,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
        .with_id(TransactionId::from(id))
    }

    fn ledger() -> Vec<Transaction> {
        vec![
            txn("a", "Food", "Lunch", "2024-03-01"),
            txn("b", "Rent", "March rent", "2024-03-05"),
            txn("c", "Food", "Dinner", "2024-04-01"),
            txn("d", "Travel", "Train", "2024-03-05"),
        ]
    }

    fn ids(rows: &[Transaction]) -> Vec<&str> {
        rows.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_newest_first_stable() {
        let rows = filter_register(&ledger(), &RegisterFilter::default());
        assert_eq!(ids(&rows), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_query_matches_category_and_desc() {
        let filter = RegisterFilter {
            query: Some("FOOD".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_register(&ledger(), &filter)), vec!["c", "a"]);

        let filter = RegisterFilter {
            query: Some("march".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_register(&ledger(), &filter)), vec!["b"]);
    }

    #[test]
    fn test_period_scope() {
        let filter = RegisterFilter {
            query: Some("food".into()),
            period: ReportingPeriod::month(2024, 3),
        };
        assert_eq!(ids(&filter_register(&ledger(), &filter)), vec!["a"]);
    }

    #[test]
    fn test_no_matches() {
        let filter = RegisterFilter {
            query: Some("nothing".into()),
            ..Default::default()
        };
        assert!(filter_register(&ledger(), &filter).is_empty());
    }
}
