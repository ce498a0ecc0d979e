//! Logs command - inspect the sign-up, login and transfer event log

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use remit_core::services::logging::now_ms;
use remit_core::services::LogEntry;
use remit_core::{EntryPoint, LoggingService};
use serde_json::json;

use super::get_data_dir;
use crate::output::{self, create_table};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent events, newest first
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only rejected operations (failed logins, refused transfers, ...)
        #[arg(long)]
        errors: bool,
        /// Only one event, e.g. transfer_completed
        #[arg(long, conflicts_with = "errors")]
        event: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove old events
    Clear {
        /// Remove events older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Remove every event regardless of age
        #[arg(long, conflicts_with = "older_than_days")]
        all: bool,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Per-event totals and the log file location
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let service = open_log()?;
    match command {
        LogsCommands::List {
            limit,
            errors,
            event,
            json,
        } => list(&service, limit, errors, event.as_deref(), json),
        LogsCommands::Clear {
            older_than_days,
            all,
            force,
            json,
        } => {
            let cutoff = if all {
                i64::MAX
            } else {
                cutoff_ms(now_ms(), older_than_days)
            };
            clear(&service, cutoff, all, older_than_days, force, json)
        }
        LogsCommands::Stats { json } => stats(&service, json),
    }
}

fn open_log() -> Result<LoggingService> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

/// Timestamp `days` before `now`, saturating for huge day counts
fn cutoff_ms(now: i64, days: u64) -> i64 {
    let span = i64::try_from(days)
        .unwrap_or(i64::MAX)
        .saturating_mul(DAY_MS);
    now.saturating_sub(span)
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Error column: the error kind when known, else the message
fn describe_error(entry: &LogEntry) -> String {
    entry
        .error_details
        .as_deref()
        .or(entry.error_message.as_deref())
        .unwrap_or("")
        .to_string()
}

fn list(
    service: &LoggingService,
    limit: usize,
    errors: bool,
    event: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let entries = match (errors, event) {
        (true, _) => service.get_errors(limit)?,
        (false, Some(name)) => service.get_by_event(name, limit)?,
        (false, None) => service.get_recent(limit)?,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        output::info("No events recorded yet.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Time", "Mode", "Event", "Command", "Error"]);
    for entry in &entries {
        let event = if entry.error_message.is_some() {
            entry.event.red().to_string()
        } else {
            entry.event.clone()
        };
        table.add_row(vec![
            format_timestamp(entry.timestamp),
            entry.entry_point.clone(),
            event,
            entry.command.clone().unwrap_or_default(),
            describe_error(entry),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn clear(
    service: &LoggingService,
    cutoff: i64,
    all: bool,
    older_than_days: u64,
    force: bool,
    json_output: bool,
) -> Result<()> {
    if !force && !json_output {
        let prompt = if all {
            "Remove every logged event?".to_string()
        } else {
            format!("Remove events older than {} days?", older_than_days)
        };
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = service.delete_before(cutoff)?;
    if json_output {
        println!("{}", json!({ "deleted": deleted }));
    } else {
        output::success(&format!("Removed {} events", deleted));
    }
    Ok(())
}

fn stats(service: &LoggingService, json_output: bool) -> Result<()> {
    let counts = service.event_counts()?;
    let total: u64 = counts.values().sum();
    let errors = service.get_errors(usize::MAX)?.len();

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "total_entries": total,
                "error_count": errors,
                "events": counts,
                "log_path": service.log_path().to_string_lossy(),
                "log_size_bytes": service.size_bytes(),
            }))?
        );
        return Ok(());
    }

    println!("{}", "Event Log".bold());
    println!("  File: {}", service.log_path().display());
    println!("  Size: {} bytes", service.size_bytes());
    println!("  Entries: {} ({} rejected)", total, errors);

    if !counts.is_empty() {
        let mut table = create_table();
        table.set_header(vec!["Event", "Count"]);
        for (event, count) in &counts {
            table.add_row(vec![event.clone(), count.to_string()]);
        }
        println!("{}", table);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_subtracts_whole_days() {
        assert_eq!(cutoff_ms(10 * DAY_MS, 3), 7 * DAY_MS);
        assert_eq!(cutoff_ms(10 * DAY_MS, 0), 10 * DAY_MS);
    }

    #[test]
    fn test_cutoff_saturates_on_huge_day_counts() {
        assert_eq!(cutoff_ms(1_000, u64::MAX), 1_000 - i64::MAX);
        assert_eq!(cutoff_ms(1_000, i64::MAX as u64 / 1000), 1_000 - i64::MAX);
    }
}
