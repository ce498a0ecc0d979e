//! Start command - the interactive home screen

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password, Select};
use remit_core::EntryPoint;

use super::signup::create_account;
use super::transfer::login;
use super::{admin, get_context, get_logger, load_store, select_country, user};
use crate::output;

pub fn run() -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Interactive);

    println!("{}", "Money Transfer App".bold());

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Choose an option")
            .items(&["Login", "Sign-Up", "Admin", "Quit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                println!("{}", "Log In".bold());
                let username: String = Input::new().with_prompt("Username").interact_text()?;
                let password = Password::new().with_prompt("Password").interact()?;

                let mut store = load_store(&ctx, &logger)?;
                match login(&ctx, &logger, &mut store, &username, &password) {
                    Ok(session) => {
                        output::success("Login successful!");
                        user::run(&ctx, &logger, &session)?;
                    }
                    Err(e) => output::error(&e.to_string()),
                }
            }
            1 => {
                println!("{}", "Create a New Account".bold());
                let username: String =
                    Input::new().with_prompt("Enter your username").interact_text()?;
                let country = select_country("Select your country", None)?;
                let password = Password::new().with_prompt("Enter your password").interact()?;

                match create_account(&ctx, &logger, &username, &password, country) {
                    Ok(_) => output::success("Account created successfully!"),
                    Err(e) => output::error(&e.to_string()),
                }
            }
            2 => {
                println!("{}", "Admin Login".bold());
                let username: String =
                    Input::new().with_prompt("Admin Username").interact_text()?;
                let password = Password::new().with_prompt("Admin Password").interact()?;

                match admin::login(&ctx, &logger, &username, &password) {
                    Ok(session) => {
                        output::success("Admin login successful!");
                        admin::interactive_dashboard(&ctx, &logger, &session)?;
                    }
                    Err(remit_core::Error::InvalidCredentials) => {
                        output::error("Invalid Admin credentials!")
                    }
                    Err(e) => output::error(&e.to_string()),
                }
            }
            _ => {
                output::info("Goodbye!");
                return Ok(());
            }
        }
    }
}
