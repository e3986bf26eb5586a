//! Budget Remaining Report
//!
//! Compares the configured budget against expenses in one reporting period.

use crate::display::format_currency;
use crate::models::{ReportingPeriod, Transaction};

/// Outcome of checking spend against a budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetNote {
    /// No budget is configured for the granularity
    Unset { period: ReportingPeriod },
    /// A budget is configured
    Tracked {
        period: ReportingPeriod,
        budget: f64,
        /// Expense total within the period
        spent: f64,
        /// `budget - spent`; negative when over budget
        remaining: f64,
    },
}

impl BudgetNote {
    /// Evaluate `budget` against expenses dated within `period`
    pub fn evaluate(ledger: &[Transaction], budget: Option<f64>, period: ReportingPeriod) -> Self {
        let Some(budget) = budget else {
            return Self::Unset { period };
        };

        let spent: f64 = ledger
            .iter()
            .filter(|t| t.is_expense() && period.contains(t.date))
            .map(|t| t.amount.value())
            .sum();

        Self::Tracked {
            period,
            budget,
            spent,
            remaining: budget - spent,
        }
    }

    pub fn period(&self) -> ReportingPeriod {
        match self {
            Self::Unset { period } | Self::Tracked { period, .. } => *period,
        }
    }

    /// Signed remaining amount, if a budget is set
    pub fn remaining(&self) -> Option<f64> {
        match self {
            Self::Unset { .. } => None,
            Self::Tracked { remaining, .. } => Some(*remaining),
        }
    }

    pub fn is_over(&self) -> bool {
        self.remaining().is_some_and(|r| r < 0.0)
    }

    /// Absolute value of the remaining amount
    pub fn magnitude(&self) -> Option<f64> {
        self.remaining().map(f64::abs)
    }

    /// One-line human readable note
    pub fn message(&self, currency: &str) -> String {
        match self {
            Self::Unset { period } => format!(
                "Set a {} budget to track remaining spend.",
                period.granularity()
            ),
            Self::Tracked {
                period, remaining, ..
            } => {
                let amount = format_currency(remaining.abs(), currency);
                if *remaining < 0.0 {
                    format!("You are {} OVER your budget for {}.", amount, period)
                } else {
                    format!("You have {} remaining in your budget for {}.", amount, period)
                }
            }
        }
    }
}
