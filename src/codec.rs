//! CSV interchange format
//!
//! Export always writes the fixed column order `id,type,amount,category,desc,dateISO`
//! with a header row. Import reads any header layout and yields one
//! [`RawRow`] per data line, keyed by column name.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};

use crate::error::TallyResult;
use crate::models::Transaction;

/// Column order used for export
pub const COLUMNS: [&str; 6] = ["id", "type", "amount", "category", "desc", "dateISO"];

/// An untyped imported row: column name to cell text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Get a column's value, if the column exists
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Get a column's value, or an empty string if the column is absent
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Serialize transactions to CSV text (header first, `\n` line endings)
pub fn serialize(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(COLUMNS.join(","));

    for txn in transactions {
        let cells = [
            escape_csv(txn.id.as_str()),
            escape_csv(txn.kind.as_str()),
            escape_csv(&txn.amount.to_string()),
            escape_csv(&txn.category),
            escape_csv(&txn.desc),
            escape_csv(&txn.date_iso()),
        ];
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

/// Parse CSV text into rows keyed by the header's column names
///
/// Blank lines are skipped and the first non-blank line is the header.
/// Input with no non-blank lines yields an empty result. Short rows get
/// empty strings for their missing columns; extra cells beyond the header
/// are ignored.
pub fn parse(text: &str) -> TallyResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut header: Option<StringRecord> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }

        if header.is_none() {
            header = Some(record);
            continue;
        }

        if let Some(columns) = &header {
            let row: RawRow = columns
                .iter()
                .enumerate()
                .map(|(i, column)| (column, record.get(i).unwrap_or("")))
                .collect();
            rows.push(row);
        }
    }

    tracing::debug!(rows = rows.len(), "parsed CSV");
    Ok(rows)
}

/// A line with no delimiters and only whitespace
///
/// Lines of bare delimiters such as `,,` are rows, not blank lines.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.iter().all(|field| field.trim().is_empty())
}

/// Quote a field if it contains a comma, a quote or a line break
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, TransactionId, TransactionKind};
    use chrono::NaiveDate;

    fn txn(id: &str, desc: &str) -> Transaction {
        Transaction::new(
            TransactionKind::Income,
            Amount::new(1200.0).unwrap(),
            "Salary",
            desc,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .with_id(TransactionId::from(id))
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_csv("cr\ronly"), "\"cr\ronly\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_serialize_header_and_rows() {
        let csv = serialize(&[txn("abc", "March pay")]);
        assert_eq!(
            csv,
            "id,type,amount,category,desc,dateISO\nabc,income,1200,Salary,March pay,2024-03-01"
        );
    }

    #[test]
    fn test_serialize_empty_ledger_is_header_only() {
        assert_eq!(serialize(&[]), "id,type,amount,category,desc,dateISO");
    }

    #[test]
    fn test_parse_quoted_fields() {
        let text = "id,type,amount,category,desc,dateISO\n\
            ,income,\"1,000\",Pay,\"Hi \"\"there\"\"\",2024-03-01";
        let rows = parse(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field("amount"), "1,000");
        assert_eq!(rows[0].field("desc"), "Hi \"there\"");
        assert_eq!(rows[0].field("id"), "");
        assert_eq!(rows[0].field("dateISO"), "2024-03-01");
    }

    #[test]
    fn test_parse_crlf_and_blank_lines() {
        let text = "\r\n  \nid,amount\r\n\r\na,1\r\n   \r\nb,2\r\n";
        let rows = parse(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("id"), "a");
        assert_eq!(rows[1].field("amount"), "2");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n   \r\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse("id,type,amount").unwrap().is_empty());
    }

    #[test]
    fn test_parse_reordered_and_partial_columns() {
        let text = "dateISO,amount,notes\n2024-01-02,5,extra\n2024-01-03";
        let rows = parse(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("amount"), "5");
        assert_eq!(rows[0].field("notes"), "extra");
        assert_eq!(rows[0].get("category"), None);
        assert_eq!(rows[0].field("category"), "");
        assert_eq!(rows[1].field("amount"), "");
    }

    #[test]
    fn test_parse_extra_cells_ignored() {
        let rows = parse("id,amount\nx,3,surplus,more").unwrap();
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].field("amount"), "3");
    }

    #[test]
    fn test_round_trip_awkward_descriptions() {
        let descs = [
            "comma, inside",
            "quote \" inside",
            "multi\nline",
            "a\rb",
            "x\r\ny",
            "\"fully quoted\"",
            "",
            "trailing space ",
        ];
        let transactions: Vec<_> = descs
            .iter()
            .enumerate()
            .map(|(i, d)| txn(&format!("id-{}", i), d))
            .collect();

        let rows = parse(&serialize(&transactions)).unwrap();
        assert_eq!(rows.len(), descs.len());
        for (row, desc) in rows.iter().zip(descs) {
            assert_eq!(row.field("desc"), desc);
        }
    }

    #[test]
    fn test_parse_keeps_delimiter_only_lines() {
        let rows = parse("id,type,amount\n,,\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field("amount"), "");
    }

    #[test]
    fn test_raw_row_from_iter() {
        let row: RawRow = [("id", "1"), ("amount", "2")].into_iter().collect();
        assert_eq!(row.field("id"), "1");
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
    }
}
