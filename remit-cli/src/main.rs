//! Remit CLI - send money across five currencies from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{admin, logs, quote, rates, signup, start, transfer};

/// Remit - money transfers with currency conversion
#[derive(Parser)]
#[command(name = "remit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive home screen (default)
    Start,

    /// Create a new account
    Signup {
        /// Username for the new account
        #[arg(long)]
        username: Option<String>,
        /// Account country (India, UK, US, Canada, Saudi)
        #[arg(long)]
        country: Option<String>,
        /// Password (falls back to REMIT_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview a transfer without logging in
    Quote {
        /// Sender country
        #[arg(long)]
        from: String,
        /// Recipient country
        #[arg(long)]
        to: String,
        /// Whole amount in the sender's currency
        #[arg(long)]
        amount: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer money to another user
    Transfer {
        /// Sending account
        #[arg(long)]
        username: Option<String>,
        /// Receiving account
        #[arg(long)]
        recipient: String,
        /// Recipient country (defaults to the recipient account's country)
        #[arg(long)]
        to: Option<String>,
        /// Whole amount in the sender's currency
        #[arg(long)]
        amount: u64,
        /// Password (falls back to REMIT_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Administrator commands
    Admin {
        #[command(subcommand)]
        command: admin::AdminCommands,
    },

    /// Show currency, exchange rate and fee tables
    Rates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Start) {
        Commands::Start => start::run(),
        Commands::Signup { username, country, password, json } => {
            signup::run(username, country, password, json)
        }
        Commands::Quote { from, to, amount, json } => quote::run(&from, &to, amount, json),
        Commands::Transfer { username, recipient, to, amount, password, json } => {
            transfer::run(username, &recipient, to, amount, password, json)
        }
        Commands::Admin { command } => admin::run(command),
        Commands::Rates { json } => rates::run(json),
        Commands::Logs { command } => logs::run(command),
    }
}
