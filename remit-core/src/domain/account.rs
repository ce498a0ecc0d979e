//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::country::{Country, Currency};
use super::transaction::Transaction;

/// A registered user's account, keyed by username in the store
///
/// `password` holds an Argon2id PHC string. Stores written by older
/// versions may still carry plaintext, which is upgraded on login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub password: String,
    pub country: Country,
    /// Amount in the account's own currency
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    #[serde(default)]
    pub transaction_log: Vec<Transaction>,
}

impl Account {
    /// Create a new account with an empty log
    pub fn new(password_hash: impl Into<String>, country: Country, balance: Decimal) -> Self {
        Self {
            password: password_hash.into(),
            country,
            balance,
            transaction_log: Vec::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.country.currency()
    }

    /// Balance formatted with the account currency's symbol
    pub fn formatted_balance(&self) -> String {
        self.currency().format_amount(self.balance)
    }

    /// Validate account data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.password.is_empty() {
            return Err("password cannot be empty");
        }
        if self.balance.is_sign_negative() && !self.balance.is_zero() {
            return Err("balance cannot be negative");
        }
        Ok(())
    }
}
