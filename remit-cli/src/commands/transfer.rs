//! Transfer command - log in and commit a single transfer

use anyhow::Result;
use remit_core::domain::result::Result as CoreResult;
use remit_core::services::TransferReceipt;
use remit_core::{
    AccountStore, Country, EntryPoint, LogEvent, LoggingService, OperationResult, RemitContext,
    Session,
};
use rust_decimal::Decimal;

use super::{
    get_context, get_logger, get_password_or_prompt, input_or_prompt, load_store, log_event,
    log_rejection,
};
use crate::output;

pub fn run(
    username: Option<String>,
    recipient: &str,
    to: Option<String>,
    amount: u64,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Cli);

    let username = input_or_prompt(username, "Username")?;
    let password = get_password_or_prompt(password, "Password")?;
    let recipient_country = to.map(|c| c.parse::<Country>()).transpose()?;

    let mut store = load_store(&ctx, &logger)?;
    let result = login(&ctx, &logger, &mut store, &username, &password).and_then(|session| {
        // Default to the country the recipient signed up with
        let country = match recipient_country {
            Some(c) => c,
            None => store
                .get(recipient.trim())
                .map(|a| a.country)
                .ok_or_else(|| remit_core::Error::not_found(format!("recipient '{}'", recipient)))?,
        };
        commit(&ctx, &logger, &mut store, &session, recipient, country, Decimal::from(amount))
    });

    if json {
        let out: OperationResult<TransferReceipt> = result.into();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let receipt = result?;
    print_receipt(&receipt);
    Ok(())
}

pub(super) fn login(
    ctx: &RemitContext,
    logger: &Option<LoggingService>,
    store: &mut AccountStore,
    username: &str,
    password: &str,
) -> CoreResult<Session> {
    match ctx.auth_service.login(store, username, password) {
        Ok(result) => {
            log_event(logger, LogEvent::new("login_succeeded").with_command("login"));
            if result.credential_upgraded {
                log_event(logger, LogEvent::new("credential_upgraded").with_command("login"));
            }
            Ok(result.session)
        }
        Err(e) => {
            log_rejection(logger, "login_failed", "login", &e);
            Err(e)
        }
    }
}

pub(super) fn commit(
    ctx: &RemitContext,
    logger: &Option<LoggingService>,
    store: &mut AccountStore,
    session: &Session,
    recipient: &str,
    recipient_country: Country,
    amount: Decimal,
) -> CoreResult<TransferReceipt> {
    match ctx
        .transfer_service
        .transfer(store, session, recipient, recipient_country, amount)
    {
        Ok(receipt) => {
            log_event(logger, LogEvent::new("transfer_completed").with_command("transfer"));
            Ok(receipt)
        }
        Err(e) => {
            log_rejection(logger, "transfer_rejected", "transfer", &e);
            Err(e)
        }
    }
}

pub(super) fn print_receipt(receipt: &TransferReceipt) {
    let q = &receipt.quote;
    output::success(&format!(
        "Successfully transferred {} {} to {}",
        q.amount, q.sender_currency, receipt.recipient
    ));
    println!(
        "Remaining balance: {}",
        q.sender_currency.format_amount(receipt.balance_after)
    );
}
