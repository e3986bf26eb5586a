//! Reporting periods
//!
//! Budgets and period-scoped aggregates are evaluated either per calendar
//! month ("2025-01") or per calendar day ("2025-01-15"), depending on the
//! configured granularity.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How budgets and period filters are scoped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportingGranularity {
    /// Calendar months (default, e.g. "2025-01")
    #[default]
    Monthly,
    /// Calendar days (e.g. "2025-01-15")
    Daily,
}

impl ReportingGranularity {
    /// Lowercase name, also used in storage keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for ReportingGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportingGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "daily" | "day" => Ok(Self::Daily),
            other => Err(format!(
                "Unknown granularity '{}': expected 'monthly' or 'daily'",
                other
            )),
        }
    }
}

/// A single reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportingPeriod {
    /// A calendar month
    Month { year: i32, month: u32 },
    /// A single calendar day
    Day(NaiveDate),
}

impl ReportingPeriod {
    /// Create a monthly period
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self::Month { year, month })
    }

    /// Create a daily period
    pub fn day(date: NaiveDate) -> Self {
        Self::Day(date)
    }

    /// The period of the given granularity that contains `date`
    pub fn containing(granularity: ReportingGranularity, date: NaiveDate) -> Self {
        match granularity {
            ReportingGranularity::Monthly => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            ReportingGranularity::Daily => Self::Day(date),
        }
    }

    /// The current period (UTC calendar)
    pub fn current(granularity: ReportingGranularity) -> Self {
        Self::containing(granularity, Utc::now().date_naive())
    }

    /// Parse a period key for the given granularity
    ///
    /// Monthly expects `YYYY-MM`, daily expects `YYYY-MM-DD`.
    pub fn parse(granularity: ReportingGranularity, s: &str) -> Result<Self, String> {
        let s = s.trim();
        match granularity {
            ReportingGranularity::Monthly => {
                let date = (s.len() == 7)
                    .then(|| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok())
                    .flatten()
                    .ok_or_else(|| format!("Invalid month '{}': expected YYYY-MM", s))?;
                Ok(Self::containing(granularity, date))
            }
            ReportingGranularity::Daily => {
                let date = (s.len() == 10)
                    .then(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                    .flatten()
                    .ok_or_else(|| format!("Invalid day '{}': expected YYYY-MM-DD", s))?;
                Ok(Self::Day(date))
            }
        }
    }

    /// Granularity of this period
    pub fn granularity(&self) -> ReportingGranularity {
        match self {
            Self::Month { .. } => ReportingGranularity::Monthly,
            Self::Day(_) => ReportingGranularity::Daily,
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
            Self::Day(day) => date == *day,
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}
