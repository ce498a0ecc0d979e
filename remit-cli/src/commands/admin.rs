//! Admin commands - dashboard and credential management

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Select;
use remit_core::config::Config;
use remit_core::domain::result::Result as CoreResult;
use remit_core::services::AccountSummary;
use remit_core::{AccountStore, EntryPoint, LogEvent, LoggingService, RemitContext, Session};
use serde_json::json;

use super::{
    get_context, get_data_dir, get_logger, get_password_or_prompt, get_password_with_confirm,
    input_or_prompt, load_store, log_event, log_rejection,
};
use crate::output::{self, create_table, describe_transaction};

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Show earnings and every user's transactions
    Dashboard {
        /// Admin username
        #[arg(long)]
        username: Option<String>,
        /// Admin password (falls back to REMIT_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
        /// Also list every user's balance and log
        #[arg(long)]
        users: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store the admin username and a hash of the admin password
    SetCredential {
        /// Admin username
        #[arg(long, default_value = "admin01")]
        username: String,
        /// Admin password (falls back to REMIT_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
    },
}

pub fn run(command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Dashboard {
            username,
            password,
            users,
            json,
        } => {
            let ctx = get_context()?;
            let logger = get_logger(EntryPoint::Cli);

            let username = input_or_prompt(username, "Admin Username")?;
            let password = get_password_or_prompt(password, "Admin Password")?;
            let session = login(&ctx, &logger, &username, &password)?;
            let store = load_store(&ctx, &logger)?;

            if json {
                let dashboard = ctx.admin_service.dashboard(&store, &session)?;
                let mut out = json!({
                    "dashboard": dashboard,
                    "transactions": ctx.admin_service.transactions(&store, &session)?,
                });
                if users {
                    out["users"] = json!(ctx.admin_service.accounts(&store, &session)?);
                }
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            print_dashboard(&ctx, &store, &session)?;
            if users {
                println!();
                print_users(&ctx.admin_service.accounts(&store, &session)?);
            }
            Ok(())
        }
        AdminCommands::SetCredential { username, password } => {
            let data_dir = get_data_dir()?;
            std::fs::create_dir_all(&data_dir)?;
            let ctx = get_context()?;
            let logger = get_logger(EntryPoint::Cli);

            let password = get_password_with_confirm(password, "New admin password")?;
            let credential = ctx.auth_service.make_admin_credential(&username, &password)?;

            let mut config = Config::load(&data_dir)?;
            config.set_admin(credential);
            config.save(&data_dir)?;

            log_event(&logger, LogEvent::new("admin_credential_set").with_command("admin"));
            output::success(&format!("Admin credential saved for '{}'", username.trim()));
            Ok(())
        }
    }
}

pub(super) fn login(
    ctx: &RemitContext,
    logger: &Option<LoggingService>,
    username: &str,
    password: &str,
) -> CoreResult<Session> {
    match ctx.auth_service.admin_login(username, password) {
        Ok(session) => {
            log_event(logger, LogEvent::new("admin_login_succeeded").with_command("admin"));
            Ok(session)
        }
        Err(e) => {
            log_rejection(logger, "admin_login_failed", "admin", &e);
            if let remit_core::Error::Config(_) = e {
                output::warning("Run 'remit admin set-credential' to configure the admin account.");
            }
            Err(e)
        }
    }
}

/// Admin screen of the interactive app
pub(super) fn interactive_dashboard(
    ctx: &RemitContext,
    logger: &Option<LoggingService>,
    session: &Session,
) -> Result<()> {
    let mut show_users = false;
    loop {
        let store = load_store(ctx, logger)?;
        println!();
        print_dashboard(ctx, &store, session)?;
        if show_users {
            println!();
            print_users(&ctx.admin_service.accounts(&store, session)?);
        }
        println!();

        let toggle = if show_users { "Hide User Data" } else { "Show User Data" };
        let choice = Select::new()
            .items(&[toggle, "Go Back to Home Screen"])
            .default(0)
            .interact()?;

        match choice {
            0 => show_users = !show_users,
            _ => return Ok(()),
        }
    }
}

fn print_dashboard(ctx: &RemitContext, store: &AccountStore, session: &Session) -> Result<()> {
    let dashboard = ctx.admin_service.dashboard(store, session)?;

    println!("{}", "Admin Dashboard".bold());
    for summary in ctx.admin_service.accounts(store, session)? {
        if summary.transaction_log.is_empty() {
            println!("User: {} - {}", summary.username, "No transactions yet.".dimmed());
            continue;
        }
        for tx in &summary.transaction_log {
            println!("User: {} - {}", summary.username, describe_transaction(tx));
        }
    }
    println!();
    println!(
        "App Earnings from Transaction Fees: {}",
        dashboard.formatted_total_fees.green().bold()
    );
    Ok(())
}

fn print_users(accounts: &[AccountSummary]) {
    let mut table = create_table();
    table.set_header(vec!["User", "Country", "Balance", "Transactions"]);
    for account in accounts {
        table.add_row(vec![
            account.username.clone(),
            account.country.to_string(),
            account.formatted_balance.clone(),
            account.transaction_log.len().to_string(),
        ]);
    }
    println!("{}", table);

    for account in accounts {
        if account.transaction_log.is_empty() {
            continue;
        }
        println!();
        println!("{}", format!("Transaction Log: {}", account.username).bold());
        for tx in &account.transaction_log {
            println!("  {}", describe_transaction(tx));
        }
    }
}
