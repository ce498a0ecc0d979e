//! Quote command - preview a transfer

use anyhow::Result;
use colored::Colorize;
use remit_core::services::transfer::{quote, TransferQuote};
use remit_core::Country;
use rust_decimal::Decimal;

pub fn run(from: &str, to: &str, amount: u64, json: bool) -> Result<()> {
    let sender: Country = from.parse()?;
    let recipient: Country = to.parse()?;
    let q = quote(sender, recipient, Decimal::from(amount))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&q)?);
    } else {
        print_quote(&q);
    }
    Ok(())
}

/// The "Calculate" readout
pub fn print_quote(q: &TransferQuote) {
    println!(
        "Converted Amount: {} {}",
        format!("{:.2}", q.converted_amount).bold(),
        q.recipient_currency
    );
    println!("Transaction Fee: {} {}", q.fee, q.sender_currency);
    println!("Total Deduction: {:.2} {}", q.total_deduction, q.sender_currency);
    if let Some(rate) = q.exchange_rate {
        println!(
            "{}",
            format!("Rate: 1 {} = {} {}", q.sender_currency, rate, q.recipient_currency).dimmed()
        );
    }
}
