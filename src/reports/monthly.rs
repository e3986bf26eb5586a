//! Monthly Series Report
//!
//! Income and expense totals per calendar month, in chronological order.
//! Months with no activity are absent rather than zero-filled.

use std::collections::BTreeMap;

use crate::display::{format_bar, format_currency};
use crate::models::{Transaction, TransactionKind};

const BAR_WIDTH: usize = 30;

/// Per-month income and expense totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    /// Month keys (`YYYY-MM`), strictly ascending
    pub labels: Vec<String>,
    /// Income total per label
    pub income: Vec<f64>,
    /// Expense total per label
    pub expense: Vec<f64>,
}

impl MonthlySeries {
    /// Group a ledger by month
    pub fn generate(ledger: &[Transaction]) -> Self {
        let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

        for txn in ledger {
            let entry = months
                .entry(txn.date.format("%Y-%m").to_string())
                .or_insert((0.0, 0.0));
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount.value(),
                TransactionKind::Expense => entry.1 += txn.amount.value(),
            }
        }

        let mut series = Self::default();
        for (label, (income, expense)) in months {
            series.labels.push(label);
            series.income.push(income);
            series.expense.push(expense);
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Render as a pair of bar charts per month
    pub fn format_terminal(&self, currency: &str) -> String {
        if self.is_empty() {
            return "No transactions to chart.\n".to_string();
        }

        let max = self
            .income
            .iter()
            .chain(self.expense.iter())
            .copied()
            .fold(0.0_f64, f64::max);

        let mut output = String::new();
        output.push_str("Monthly Income & Expenses\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for (i, label) in self.labels.iter().enumerate() {
            output.push_str(&format!(
                "{:<8} in  {} {:>14}\n",
                label,
                format_bar(self.income[i], max, BAR_WIDTH),
                format_currency(self.income[i], currency)
            ));
            output.push_str(&format!(
                "{:<8} out {} {:>14}\n",
                "",
                format_bar(self.expense[i], max, BAR_WIDTH),
                format_currency(self.expense[i], currency)
            ));
        }

        output
    }
}
