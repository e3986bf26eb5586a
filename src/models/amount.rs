//! Amount type for transaction values
//!
//! Amounts are currency-agnostic positive decimals. No rounding is applied
//! here; formatting to two decimals happens at display time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive, finite transaction amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create an amount, rejecting zero, negative and non-finite values
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Parse an amount from text
    ///
    /// Accepts plain decimal notation such as "12", "12.50" or "1e3".
    /// Thousands separators ("1,000") and currency symbols are rejected.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| AmountError::InvalidFormat(trimmed.to_string()))?;
        Self::new(value)
    }

    /// Get the numeric value
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Shortest representation that parses back to the same value
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors produced when building an [`Amount`]
#[derive(Debug, Clone, PartialEq)]
pub enum AmountError {
    InvalidFormat(String),
    NotFinite,
    NotPositive(f64),
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
            Self::NotFinite => write!(f, "Amount must be a finite number"),
            Self::NotPositive(v) => write!(f, "Amount must be greater than zero, got {}", v),
        }
    }
}

impl std::error::Error for AmountError {}
