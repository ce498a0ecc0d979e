//! Signup command - create a new account

use anyhow::Result;
use remit_core::domain::result::Result as CoreResult;
use remit_core::{Country, EntryPoint, LogEvent, LoggingService, OperationResult, RemitContext, Session};

use super::{
    get_context, get_logger, get_password_or_prompt, input_or_prompt, load_store, log_event,
    log_rejection, select_country,
};
use crate::output;

pub fn run(
    username: Option<String>,
    country: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Cli);

    let username = input_or_prompt(username, "Enter your username")?;
    let country = match country {
        Some(c) => c.parse::<Country>()?,
        None => select_country("Select your country", None)?,
    };
    let password = get_password_or_prompt(password, "Enter your password")?;

    let result = create_account(&ctx, &logger, &username, &password, country);

    if json {
        let out: OperationResult<Session> = result.into();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match result {
        Ok(_) => {
            output::success("Account created successfully!");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Shared by the subcommand and the interactive Sign-Up screen
pub(super) fn create_account(
    ctx: &RemitContext,
    logger: &Option<LoggingService>,
    username: &str,
    password: &str,
    country: Country,
) -> CoreResult<Session> {
    let mut store = load_store(ctx, logger)?;

    match ctx.auth_service.sign_up(&mut store, username, password, country) {
        Ok(session) => {
            log_event(logger, LogEvent::new("signup_completed").with_command("signup"));
            Ok(session)
        }
        Err(e) => {
            log_rejection(logger, "signup_rejected", "signup", &e);
            Err(e)
        }
    }
}
