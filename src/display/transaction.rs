//! Transaction display formatting
//!
//! Renders the transaction register as a table for terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    desc: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Transaction> for RegisterRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date_iso(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            desc: truncate(&txn.desc, 40),
            amount: format!("{:.2}", txn.amount.value()),
            id: txn.id.to_string(),
        }
    }
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<RegisterRow> = transactions.iter().map(RegisterRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(4), Alignment::right());

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date_iso()));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {:.2}\n", txn.amount.value()));
    output.push_str(&format!("Category:    {}\n", txn.category_label()));
    if !txn.desc.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.desc));
    }

    output
}

/// Truncate to `max` characters, marking the cut with an ellipsis
fn truncate(s: &str, max: usize) -> String {
    let flat = s.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let kept: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
