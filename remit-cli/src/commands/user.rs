//! User dashboard - the logged-in screen of the interactive app

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Select};
use remit_core::{LoggingService, RemitContext, Session};
use rust_decimal::Decimal;

use super::quote::print_quote;
use super::transfer::{commit, print_receipt};
use super::{load_store, select_country};
use crate::output;

/// Show the dashboard until the user goes back to the home screen
pub(super) fn run(ctx: &RemitContext, logger: &Option<LoggingService>, session: &Session) -> Result<()> {
    loop {
        // Re-read on every render so other sessions' writes show up
        let store = load_store(ctx, logger)?;
        let Some(account) = store.get(session.identity()) else {
            output::error("Your account no longer exists.");
            return Ok(());
        };

        println!();
        println!("{}", format!("Welcome, {}!", session.identity()).bold());
        println!("Country: {}", account.country);
        println!("Balance: {}", account.formatted_balance());
        println!();

        let choice = Select::new()
            .with_prompt("What would you like to do?")
            .items(&["Transfer Money", "Go Back to Home Screen"])
            .default(0)
            .interact()?;

        match choice {
            0 => transfer_form(ctx, logger, session)?,
            _ => return Ok(()),
        }
    }
}

/// Recipient country, recipient and amount, then Calculate / Transfer
fn transfer_form(ctx: &RemitContext, logger: &Option<LoggingService>, session: &Session) -> Result<()> {
    println!("{}", "Transfer Money".bold());

    let recipient_country = select_country("Select recipient's country", None)?;

    let store = load_store(ctx, logger)?;
    let recipients = store.usernames();
    let Some(sender) = store.get(session.identity()) else {
        return Ok(());
    };
    let sender_country = sender.country;

    let index = Select::new()
        .with_prompt("Select recipient")
        .items(&recipients)
        .default(0)
        .interact()?;
    let recipient = recipients[index].clone();

    let amount: u64 = Input::new()
        .with_prompt(format!("Enter amount to transfer ({})", sender_country))
        .default(1)
        .validate_with(|n: &u64| -> Result<(), &str> {
            if *n >= 1 {
                Ok(())
            } else {
                Err("Amount must be at least 1")
            }
        })
        .interact_text()?;
    let amount = Decimal::from(amount);

    loop {
        let action = Select::new()
            .items(&["Calculate", "Transfer", "Cancel"])
            .default(0)
            .interact()?;

        match action {
            0 => {
                let store = load_store(ctx, logger)?;
                match ctx
                    .transfer_service
                    .preview(&store, session, recipient_country, amount)
                {
                    Ok(q) => print_quote(&q),
                    Err(e) => output::error(&e.to_string()),
                }
            }
            1 => {
                let mut store = load_store(ctx, logger)?;
                match commit(ctx, logger, &mut store, session, &recipient, recipient_country, amount) {
                    Ok(receipt) => print_receipt(&receipt),
                    Err(remit_core::Error::InsufficientBalance { .. }) => {
                        output::error("Insufficient balance!")
                    }
                    Err(e) => output::error(&e.to_string()),
                }
                return Ok(());
            }
            _ => return Ok(()),
        }
    }
}
