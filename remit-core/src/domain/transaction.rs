//! Transaction domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::country::{Country, Currency};

/// A transfer recorded in the sender's log
///
/// `amount` and `transaction_fee` are in the sender's currency. The fee is
/// captured at transfer time and stored denormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: Country,
    pub to: Country,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub transaction_fee: Decimal,
    /// Recipient username; absent in logs written before it was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a transaction for a transfer out of `from`
    pub fn new(from: Country, to: Country, amount: Decimal) -> Self {
        Self {
            from,
            to,
            amount,
            currency: from.currency(),
            transaction_fee: from.transaction_fee(),
            recipient: None,
            timestamp: None,
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
