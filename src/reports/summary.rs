//! Summary Report
//!
//! Income, expense and balance totals over a ledger snapshot.

use crate::display::format_currency;
use crate::models::{Transaction, TransactionKind};

/// Ledger totals
///
/// No rounding is applied; formatting is left to [`Summary::format_terminal`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// Sum of all income amounts
    pub income: f64,
    /// Sum of all expense amounts
    pub expense: f64,
    /// `income - expense`
    pub balance: f64,
}

impl Summary {
    /// Compute totals for a ledger
    pub fn generate(ledger: &[Transaction]) -> Self {
        let (income, expense) = ledger.iter().fold((0.0, 0.0), |(inc, exp), txn| {
            match txn.kind {
                TransactionKind::Income => (inc + txn.amount.value(), exp),
                TransactionKind::Expense => (inc, exp + txn.amount.value()),
            }
        });

        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let line = |label: &str, value: f64| {
            format!("{:<10} {:>14}\n", label, format_currency(value, currency))
        };

        let mut output = String::new();
        output.push_str(&line("Income", self.income));
        output.push_str(&line("Expenses", self.expense));
        output.push_str(&"-".repeat(25));
        output.push('\n');
        output.push_str(&line("Balance", self.balance));
        output
    }
}
