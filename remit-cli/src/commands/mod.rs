//! CLI command implementations

pub mod admin;
pub mod logs;
pub mod quote;
pub mod rates;
pub mod signup;
pub mod start;
pub mod transfer;
mod user;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::{Input, Password, Select};
use remit_core::{
    AccountStore, Country, EntryPoint, LoadStatus, LogEvent, LoggingService, RemitContext,
};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger(entry_point: EntryPoint) -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    // Ensure directory exists
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Log a rejected operation with its error kind
pub fn log_rejection(
    logger: &Option<LoggingService>,
    event: &str,
    command: &str,
    err: &remit_core::Error,
) {
    log_event(
        logger,
        LogEvent::new(event)
            .with_command(command)
            .with_error(err.to_string())
            .with_error_details(err.kind()),
    );
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("REMIT_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".remit"))
}

/// Get or create the remit context
pub fn get_context() -> Result<RemitContext> {
    let data_dir = get_data_dir()?;

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    RemitContext::new(&data_dir).context("Failed to initialize remit context")
}

/// Load the account store, falling back to an empty one
///
/// A corrupt store is not fatal; the event is logged and the app carries on
/// as a fresh install.
pub fn load_store(
    ctx: &RemitContext,
    logger: &Option<LoggingService>,
) -> remit_core::domain::result::Result<AccountStore> {
    let loaded = ctx.load_store()?;
    if let LoadStatus::Corrupt(reason) = &loaded.status {
        log_event(
            logger,
            LogEvent::new("store_reset")
                .with_error("store file unreadable, starting empty")
                .with_error_details(reason),
        );
    }
    Ok(loaded.store)
}

/// Get password from flag, REMIT_PASSWORD env var, or prompt
pub fn get_password_or_prompt(password_flag: Option<String>, prompt: &str) -> Result<String> {
    // 1. Check --password flag first
    if let Some(p) = password_flag {
        return Ok(p);
    }

    // 2. Check REMIT_PASSWORD environment variable
    if let Ok(p) = env::var("REMIT_PASSWORD") {
        return Ok(p);
    }

    // 3. Prompt interactively
    let p = Password::new().with_prompt(prompt).interact()?;
    Ok(p)
}

/// Prompt for a password twice
pub fn get_password_with_confirm(password_flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = password_flag {
        return Ok(p);
    }
    if let Ok(p) = env::var("REMIT_PASSWORD") {
        return Ok(p);
    }

    let p = Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    Ok(p)
}

/// Text prompt unless a value was given on the command line
pub fn input_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

/// Country picker
pub fn select_country(prompt: &str, default: Option<Country>) -> Result<Country> {
    let items: Vec<&str> = Country::ALL.iter().map(|c| c.as_str()).collect();
    let default_index = default
        .and_then(|d| Country::ALL.iter().position(|c| *c == d))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;
    Ok(Country::ALL[index])
}
