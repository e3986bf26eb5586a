//! Transaction model
//!
//! A transaction is the only internally trusted record type. Untyped input
//! (CSV rows, form fields, edit requests) is converted into it either by the
//! import normalizer or by [`TransactionDraft`], both of which enforce the
//! same invariants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::{Amount, AmountError};
use super::ids::TransactionId;

/// Category used when none is given
pub const DEFAULT_CATEGORY: &str = "Other";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    /// Anything that is not explicitly income
    #[default]
    Expense,
}

impl TransactionKind {
    /// Interpret free text: "income" (any case) is income, everything else is expense
    pub fn from_loose(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("income") {
            Self::Income
        } else {
            Self::Expense
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, immutable once assigned
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Positive amount
    pub amount: Amount,

    /// Display category
    pub category: String,

    /// Free-text description
    #[serde(default)]
    pub desc: String,

    /// Calendar date (serialized as `YYYY-MM-DD`)
    #[serde(rename = "dateISO")]
    pub date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction with a fresh identifier
    pub fn new(
        kind: TransactionKind,
        amount: Amount,
        category: impl Into<String>,
        desc: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            category: category.into(),
            desc: desc.into(),
            date,
        }
    }

    /// Replace the identifier
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Category for grouping; blank categories count as [`DEFAULT_CATEGORY`]
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.category
        }
    }

    /// Date as `YYYY-MM-DD`
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Case-insensitive substring match over "category description"
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        format!("{} {}", self.category, self.desc)
            .to_lowercase()
            .contains(&query)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.2}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category_label(),
            self.amount.value()
        )
    }
}

/// A structured create or edit request carrying every field at once
///
/// Fields are raw text, as typed by a user. Nothing is applied unless the
/// whole draft validates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub kind: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub desc: Option<String>,
    pub date: Option<String>,
}

/// Fields of a draft that passed validation
struct ValidDraft {
    kind: TransactionKind,
    amount: Amount,
    category: Option<String>,
    desc: String,
    date: NaiveDate,
}

impl TransactionDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill a draft with the current values of a transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: Some(txn.kind.to_string()),
            amount: Some(txn.amount.to_string()),
            category: Some(txn.category.clone()),
            desc: Some(txn.desc.clone()),
            date: Some(txn.date_iso()),
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    fn validate(&self) -> Result<ValidDraft, TransactionValidationError> {
        let kind_raw = required(&self.kind, "type")?;
        let amount_raw = required(&self.amount, "amount")?;
        let date_raw = required(&self.date, "date")?;

        let amount = Amount::parse(amount_raw).map_err(TransactionValidationError::InvalidAmount)?;

        let date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d")
            .map_err(|_| TransactionValidationError::InvalidDate(date_raw.trim().to_string()))?;

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let desc = self
            .desc
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        Ok(ValidDraft {
            kind: TransactionKind::from_loose(kind_raw),
            amount,
            category,
            desc,
            date,
        })
    }

    /// Build a new transaction; a blank category becomes [`DEFAULT_CATEGORY`]
    pub fn build(&self) -> Result<Transaction, TransactionValidationError> {
        let valid = self.validate()?;
        Ok(Transaction::new(
            valid.kind,
            valid.amount,
            valid.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            valid.desc,
            valid.date,
        ))
    }

    /// Produce an edited copy of `existing`; the id never changes and a blank
    /// category keeps the existing one
    pub fn apply_to(
        &self,
        existing: &Transaction,
    ) -> Result<Transaction, TransactionValidationError> {
        let valid = self.validate()?;
        Ok(Transaction {
            id: existing.id.clone(),
            kind: valid.kind,
            amount: valid.amount,
            category: valid.category.unwrap_or_else(|| existing.category.clone()),
            desc: valid.desc,
            date: valid.date,
        })
    }
}

fn required<'a>(
    field: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, TransactionValidationError> {
    field
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(TransactionValidationError::MissingField(name))
}

/// Validation errors for transaction drafts
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    MissingField(&'static str),
    InvalidAmount(AmountError),
    InvalidDate(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "Missing required field: {}", name),
            Self::InvalidAmount(e) => write!(f, "Please enter a valid amount ({})", e),
            Self::InvalidDate(s) => write!(f, "Invalid date '{}': expected YYYY-MM-DD", s),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
