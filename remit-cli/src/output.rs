//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use remit_core::Transaction;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One-line description of a logged transaction
pub fn describe_transaction(tx: &Transaction) -> String {
    let mut line = format!(
        "From {} to {} - Amount: {} {} - Fee: {} {}",
        tx.from, tx.to, tx.amount, tx.currency, tx.transaction_fee, tx.currency
    );
    if let Some(recipient) = &tx.recipient {
        line.push_str(&format!(" - Recipient: {}", recipient));
    }
    line
}
