//! Category Breakdown Report
//!
//! Expense totals grouped by category, optionally restricted to a single
//! reporting period.

use std::collections::BTreeMap;

use crate::display::{format_bar, format_currency, format_percentage};
use crate::models::{ReportingPeriod, Transaction};

const BAR_WIDTH: usize = 24;

/// Expense totals per category label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    /// The period the breakdown was restricted to, if any
    pub window: Option<ReportingPeriod>,
    /// Category labels, ascending and unique
    pub labels: Vec<String>,
    /// Expense total per label
    pub values: Vec<f64>,
}

impl CategoryBreakdown {
    /// Group expenses by category
    ///
    /// Income is ignored. Blank categories are grouped under "Other".
    pub fn generate(ledger: &[Transaction], window: Option<ReportingPeriod>) -> Self {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();

        for txn in ledger.iter().filter(|t| t.is_expense()) {
            if let Some(period) = &window {
                if !period.contains(txn.date) {
                    continue;
                }
            }
            *totals.entry(txn.category_label().to_string()).or_insert(0.0) += txn.amount.value();
        }

        let (labels, values) = totals.into_iter().unzip();
        Self {
            window,
            labels,
            values,
        }
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Render as a bar chart with each category's share of the total
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        match &self.window {
            Some(period) => output.push_str(&format!("Spending by Category: {}\n", period)),
            None => output.push_str("Spending by Category\n"),
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        let total = self.total();
        let max = self.values.iter().copied().fold(0.0_f64, f64::max);

        for (label, value) in self.labels.iter().zip(&self.values) {
            let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            output.push_str(&format!(
                "{:<16} {} {:>14} {:>6}\n",
                label,
                format_bar(*value, max, BAR_WIDTH),
                format_currency(*value, currency),
                format_percentage(pct)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {} {:>14}\n",
            "Total",
            " ".repeat(BAR_WIDTH),
            format_currency(total, currency)
        ));

        output
    }
}
