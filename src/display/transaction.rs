//! Transaction display formatting

use crate::config::Settings;
use crate::models::{display_name, Transaction};

/// One register row
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    let signed = txn.signed_amount();
    format!(
        "{:>7} {:10} {:7} {:16} {:>12}  {}",
        txn.id.to_string(),
        settings.format_date(txn.date),
        txn.kind.as_str(),
        truncate(display_name(&txn.category), 16),
        settings.format_money(signed),
        txn.description.as_deref().unwrap_or("")
    )
}

/// A list of transactions, newest first
pub fn format_transaction_register(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let mut output = format!(
        "{:>7} {:10} {:7} {:16} {:>12}  {}\n",
        "ID", "Date", "Type", "Category", "Amount", "Description"
    );
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for txn in sorted {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    output
}

pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", settings.format_date(txn.date)));
    output.push_str(&format!("Amount:      {}\n", settings.format_money(txn.amount)));
    output.push_str(&format!("Category:    {}\n", display_name(&txn.category)));

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
