//! CSV import service
//!
//! Converts loosely-typed imported rows into validated transactions and
//! combines them with an existing ledger. Rows with an unusable amount are
//! dropped; every other field falls back to a default, so normalization
//! never fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::codec::{self, RawRow};
use crate::error::{TallyError, TallyResult};
use crate::models::{Amount, Transaction, TransactionId, TransactionKind, DEFAULT_CATEGORY};
use crate::services::ledger::{self, MergeMode};

/// Date formats tried, in order, after the canonical `YYYY-MM-DD`
const DATE_FORMATS: [&str; 16] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d/%m/%Y",
    "%d/%m/%y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a, %d %b %Y",
];

/// Date-time formats whose date part is kept
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalize rows, using today's UTC date for rows with unparseable dates
pub fn normalize_rows(rows: &[RawRow]) -> Vec<Transaction> {
    normalize_rows_as_of(rows, Utc::now().date_naive())
}

/// Normalize rows with an explicit fallback date
///
/// Output keeps the relative order of the surviving rows.
pub fn normalize_rows_as_of(rows: &[RawRow], today: NaiveDate) -> Vec<Transaction> {
    let mut normalized = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, today) {
            Some(txn) => normalized.push(txn),
            None => tracing::debug!(
                row = index + 1,
                amount = row.field("amount"),
                "dropping row with invalid amount"
            ),
        }
    }

    normalized
}

/// Normalize a single row; `None` when the amount is unusable
fn normalize_row(row: &RawRow, today: NaiveDate) -> Option<Transaction> {
    let id = TransactionId::from_existing_or_new(row.get("id"));
    let kind = TransactionKind::from_loose(row.field("type"));
    let amount = Amount::parse(row.field("amount")).ok()?;

    let category = match row.field("category").trim() {
        "" => DEFAULT_CATEGORY.to_string(),
        other => other.to_string(),
    };
    let desc = row.field("desc").trim().to_string();

    let date_text = match row.field("dateISO").trim() {
        "" => row.field("date").trim(),
        iso => iso,
    };
    let date = parse_date(date_text).unwrap_or(today);

    Some(Transaction {
        id,
        kind,
        amount,
        category,
        desc,
        date,
    })
}

/// Parse a date from the common textual forms seen in bank and app exports
///
/// Timestamps with an offset are converted to UTC before the time is
/// discarded.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if is_iso_date(s) {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        })
}

/// Exactly `DDDD-DD-DD`
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Result of importing a CSV file into a ledger
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// The combined ledger
    pub ledger: Vec<Transaction>,
    /// Rows that survived normalization, in file order
    pub incoming: Vec<Transaction>,
    /// Number of data rows read from the file
    pub rows_read: usize,
    /// Mode used to combine the rows with the existing ledger
    pub mode: MergeMode,
}

impl ImportOutcome {
    /// Number of rows accepted
    pub fn imported(&self) -> usize {
        self.incoming.len()
    }

    /// Number of rows discarded during normalization
    pub fn dropped(&self) -> usize {
        self.rows_read - self.incoming.len()
    }
}

/// Parse, normalize and merge CSV text against `existing`
///
/// Fails only when the text contains no data rows at all; a file whose rows
/// are all invalid succeeds with zero imported rows.
pub fn import_csv(
    text: &str,
    existing: &[Transaction],
    mode: MergeMode,
) -> TallyResult<ImportOutcome> {
    import_csv_as_of(text, existing, mode, Utc::now().date_naive())
}

/// [`import_csv`] with an explicit fallback date for undated rows
pub fn import_csv_as_of(
    text: &str,
    existing: &[Transaction],
    mode: MergeMode,
    today: NaiveDate,
) -> TallyResult<ImportOutcome> {
    let rows = codec::parse(text)?;
    if rows.is_empty() {
        return Err(TallyError::Import("No rows found in CSV".into()));
    }

    let incoming = normalize_rows_as_of(&rows, today);
    let ledger = ledger::merge(existing, &incoming, mode);

    tracing::info!(
        rows = rows.len(),
        imported = incoming.len(),
        dropped = rows.len() - incoming.len(),
        ?mode,
        "imported CSV"
    );

    Ok(ImportOutcome {
        ledger,
        incoming,
        rows_read: rows.len(),
        mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_normalize_full_row() {
        let rows = vec![row(&[
            ("id", "abc"),
            ("type", "Income"),
            ("amount", "1200.00"),
            ("category", " Salary "),
            ("desc", " March pay "),
            ("dateISO", "2024-03-01"),
        ])];

        let txns = normalize_rows_as_of(&rows, today());
        assert_eq!(txns.len(), 1);
        let t = &txns[0];
        assert_eq!(t.id.as_str(), "abc");
        assert_eq!(t.kind, TransactionKind::Income);
        assert_eq!(t.amount.value(), 1200.0);
        assert_eq!(t.category, "Salary");
        assert_eq!(t.desc, "March pay");
        assert_eq!(t.date, date(2024, 3, 1));
    }

    #[test]
    fn test_normalize_defaults() {
        let rows = vec![row(&[("amount", "5"), ("type", "refund"), ("id", "  ")])];
        let txns = normalize_rows_as_of(&rows, today());

        assert_eq!(txns.len(), 1);
        let t = &txns[0];
        assert!(!t.id.as_str().trim().is_empty());
        assert_eq!(t.kind, TransactionKind::Expense);
        assert_eq!(t.category, DEFAULT_CATEGORY);
        assert_eq!(t.desc, "");
        assert_eq!(t.date, today());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let rows = vec![row(&[("amount", "1")]), row(&[("amount", "2")])];
        let txns = normalize_rows_as_of(&rows, today());
        assert_ne!(txns[0].id, txns[1].id);
    }

    #[test]
    fn test_invalid_amounts_are_dropped_in_order() {
        let rows = vec![
            row(&[("id", "a"), ("amount", "10")]),
            row(&[("id", "b"), ("amount", "1,000")]),
            row(&[("id", "c"), ("amount", "0")]),
            row(&[("id", "d"), ("amount", "-4")]),
            row(&[("id", "e"), ("amount", "")]),
            row(&[("id", "f")]),
            row(&[("id", "g"), ("amount", "2.5")]),
        ];
        let ids: Vec<_> = normalize_rows_as_of(&rows, today())
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "g"]);
    }

    #[test]
    fn test_date_fallback_column() {
        let rows = vec![
            row(&[("amount", "1"), ("date", "2024-05-06")]),
            row(&[("amount", "1"), ("dateISO", ""), ("date", "05/07/2024")]),
        ];
        let txns = normalize_rows_as_of(&rows, today());
        assert_eq!(txns[0].date, date(2024, 5, 6));
        assert_eq!(txns[1].date, date(2024, 5, 7));
    }

    #[test]
    fn test_unparseable_date_uses_today() {
        let rows = vec![
            row(&[("amount", "1"), ("dateISO", "someday")]),
            row(&[("amount", "1"), ("dateISO", "2024-02-30")]),
        ];
        let txns = normalize_rows_as_of(&rows, today());
        assert_eq!(txns[0].date, today());
        assert_eq!(txns[1].date, today());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-01"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("2024-3-1"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("2024/03/01"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("03/01/2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("25/12/2024"), Some(date(2024, 12, 25)));
        assert_eq!(parse_date("1 March 2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("Mar 1, 2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("2024-03-01T23:30:00"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_parse_date_converts_offsets_to_utc() {
        assert_eq!(
            parse_date("2024-03-01T23:30:00-02:00"),
            Some(date(2024, 3, 2))
        );
        assert_eq!(
            parse_date("Fri, 01 Mar 2024 10:00:00 +0000"),
            Some(date(2024, 3, 1))
        );
    }

    #[test]
    fn test_normalize_never_panics_on_garbage() {
        let garbage = ["\u{0}", "🙂", "--", "9999-99-99", "1e400", "NaN", " "];
        let rows: Vec<RawRow> = garbage
            .iter()
            .map(|g| row(&[("id", g), ("type", g), ("amount", g), ("dateISO", g)]))
            .collect();
        let txns = normalize_rows_as_of(&rows, today());
        assert!(txns.is_empty());
    }

    #[test]
    fn test_import_quoted_thousands_row_is_dropped() {
        let text = "id,type,amount,category,desc,dateISO\n\
            ,income,\"1,000\",Pay,\"Hi \"\"there\"\"\",2024-03-01";
        let outcome = import_csv_as_of(text, &[], MergeMode::Merge, today()).unwrap();

        assert_eq!(outcome.rows_read, 1);
        assert_eq!(outcome.imported(), 0);
        assert_eq!(outcome.dropped(), 1);
        assert!(outcome.ledger.is_empty());
    }

    #[test]
    fn test_import_empty_file_is_batch_error() {
        let err = import_csv_as_of("\n \n", &[], MergeMode::Merge, today()).unwrap_err();
        assert!(matches!(err, TallyError::Import(_)));

        let err = import_csv_as_of("id,amount\n", &[], MergeMode::Merge, today()).unwrap_err();
        assert!(matches!(err, TallyError::Import(_)));
    }

    #[test]
    fn test_import_delimiter_only_line_counts_as_dropped_row() {
        let text = "id,type,amount\n,,\n";
        let outcome = import_csv_as_of(text, &[], MergeMode::Merge, today()).unwrap();

        assert_eq!(outcome.rows_read, 1);
        assert_eq!(outcome.imported(), 0);
        assert_eq!(outcome.dropped(), 1);
    }

    #[test]
    fn test_import_replace_and_merge() {
        let existing = normalize_rows_as_of(
            &[row(&[("id", "keep"), ("amount", "1"), ("dateISO", "2024-01-01")])],
            today(),
        );
        let text = "id,amount,dateISO\nnew,2,2024-01-02";

        let merged = import_csv_as_of(text, &existing, MergeMode::Merge, today()).unwrap();
        assert_eq!(merged.ledger.len(), 2);

        let replaced = import_csv_as_of(text, &existing, MergeMode::Replace, today()).unwrap();
        assert_eq!(replaced.ledger.len(), 1);
        assert_eq!(replaced.ledger[0].id.as_str(), "new");
    }

    #[test]
    fn test_serialize_parse_normalize_round_trip() {
        let originals = normalize_rows_as_of(
            &[
                row(&[
                    ("id", "r1"),
                    ("type", "income"),
                    ("amount", "1200.5"),
                    ("category", "Salary, main"),
                    ("desc", "He said \"hi\""),
                    ("dateISO", "2024-03-01"),
                ]),
                row(&[
                    ("id", "r2"),
                    ("amount", "0.3"),
                    ("category", "Food"),
                    ("desc", "line one\nline two"),
                    ("dateISO", "2024-04-15"),
                ]),
            ],
            today(),
        );

        let text = codec::serialize(&originals);
        let again = normalize_rows_as_of(&codec::parse(&text).unwrap(), today());
        assert_eq!(again, originals);
    }
}
