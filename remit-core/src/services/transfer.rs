//! Transfer service - quote and commit balance transfers
//!
//! A transfer debits the sender by `amount + fee` and appends one entry to
//! the sender's log. The recipient's balance is not credited: funds leave
//! the sender and are not deposited anywhere. This is the long-standing
//! observed behavior of the app and is kept as is.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{exchange_rate, AccountStore, Country, Currency, Session, Transaction};
use crate::ports::AccountRepository;

/// Computed figures for a prospective transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferQuote {
    pub sender_country: Country,
    pub recipient_country: Country,
    pub sender_currency: Currency,
    pub recipient_currency: Currency,
    /// Amount as entered, in the sender's currency
    pub amount: Decimal,
    /// Multiplier applied; `None` for same-country transfers
    pub exchange_rate: Option<Decimal>,
    /// Amount in the recipient's currency
    pub converted_amount: Decimal,
    /// Flat fee in the sender's currency
    pub fee: Decimal,
    pub total_deduction: Decimal,
}

/// Outcome of a committed transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub sender: String,
    pub recipient: String,
    pub quote: TransferQuote,
    pub balance_after: Decimal,
    pub transaction: Transaction,
}

/// Compute a transfer quote without touching any state
///
/// The amount must be a positive whole number.
pub fn quote(sender_country: Country, recipient_country: Country, amount: Decimal) -> Result<TransferQuote> {
    validate_amount(amount)?;

    let sender_currency = sender_country.currency();
    let recipient_currency = recipient_country.currency();

    let (rate, converted_amount) = if recipient_country != sender_country {
        let rate = exchange_rate(sender_currency, recipient_currency).ok_or_else(|| {
            Error::validation(format!(
                "no exchange rate from {} to {}",
                sender_currency, recipient_currency
            ))
        })?;
        (Some(rate), amount * rate)
    } else {
        (None, amount)
    };

    let fee = sender_country.transaction_fee();

    Ok(TransferQuote {
        sender_country,
        recipient_country,
        sender_currency,
        recipient_currency,
        amount,
        exchange_rate: rate,
        converted_amount,
        fee,
        total_deduction: amount + fee,
    })
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation("amount must be at least 1"));
    }
    if !amount.fract().is_zero() {
        return Err(Error::validation("amount must be a whole number"));
    }
    Ok(())
}

/// Transfer service for previewing and committing transfers
pub struct TransferService {
    repository: Arc<dyn AccountRepository>,
}

impl TransferService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Preview a transfer from the session's account
    pub fn preview(
        &self,
        store: &AccountStore,
        session: &Session,
        recipient_country: Country,
        amount: Decimal,
    ) -> Result<TransferQuote> {
        let sender = sender_account(store, session)?;
        quote(sender.country, recipient_country, amount)
    }

    /// Commit a transfer from the session's account
    ///
    /// On `InsufficientBalance` (or any other rejection) nothing is mutated
    /// and the store is not rewritten.
    pub fn transfer(
        &self,
        store: &mut AccountStore,
        session: &Session,
        recipient: &str,
        recipient_country: Country,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        let sender_country = sender_account(store, session)?.country;
        let recipient = recipient.trim();
        if !store.contains(recipient) {
            return Err(Error::not_found(format!("recipient '{}'", recipient)));
        }

        let quote = quote(sender_country, recipient_country, amount)?;
        let transaction = Transaction::new(sender_country, recipient_country, amount)
            .with_recipient(recipient)
            .with_timestamp(Utc::now());

        let sender = store
            .get_mut(session.identity())
            .ok_or_else(|| Error::not_found(format!("account '{}'", session.identity())))?;
        if sender.balance < quote.total_deduction {
            return Err(Error::InsufficientBalance {
                required: quote.total_deduction,
                available: sender.balance,
            });
        }

        sender.balance -= quote.total_deduction;
        sender.transaction_log.push(transaction.clone());
        let balance_after = sender.balance;

        if let Err(e) = self.repository.save(store) {
            if let Some(sender) = store.get_mut(session.identity()) {
                sender.balance += quote.total_deduction;
                sender.transaction_log.pop();
            }
            return Err(e);
        }

        Ok(TransferReceipt {
            sender: session.identity().to_string(),
            recipient: recipient.to_string(),
            quote,
            balance_after,
            transaction,
        })
    }
}

/// The session's own account; admins have none
fn sender_account<'a>(
    store: &'a AccountStore,
    session: &Session,
) -> Result<&'a crate::domain::Account> {
    if session.is_admin() {
        return Err(Error::unauthorized("admin sessions cannot transfer funds"));
    }
    store
        .get(session.identity())
        .ok_or_else(|| Error::not_found(format!("account '{}'", session.identity())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::Account;

    fn store_with(username: &str, country: Country, balance: i64) -> AccountStore {
        let mut store = AccountStore::new();
        store.insert(username, Account::new("hash", country, Decimal::new(balance, 0)));
        store
    }

    #[test]
    fn test_cross_country_quote() {
        let q = quote(Country::US, Country::India, Decimal::new(100, 0)).unwrap();
        assert_eq!(q.converted_amount, Decimal::new(833300, 2));
        assert_eq!(q.fee, Decimal::new(15, 1));
        assert_eq!(q.total_deduction, Decimal::new(1015, 1));
        assert_eq!(q.exchange_rate, Some(Decimal::new(8333, 2)));
        assert_eq!(q.recipient_currency, Currency::INR);
    }

    #[test]
    fn test_same_country_quote_is_not_converted() {
        let q = quote(Country::UK, Country::UK, Decimal::new(250, 0)).unwrap();
        assert_eq!(q.converted_amount, Decimal::new(250, 0));
        assert!(q.exchange_rate.is_none());
        assert_eq!(q.total_deduction, Decimal::new(25099, 2));
    }

    #[test]
    fn test_quote_rejects_bad_amounts() {
        assert!(matches!(
            quote(Country::US, Country::UK, Decimal::ZERO),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            quote(Country::US, Country::UK, Decimal::new(-5, 0)),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            quote(Country::US, Country::UK, Decimal::new(15, 1)),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_admin_session_cannot_transfer() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = TransferService::new(repo);
        let mut store = store_with("alice", Country::US, 1000);

        let err = service
            .transfer(&mut store, &Session::admin("admin01"), "alice", Country::US, Decimal::ONE)
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_unknown_recipient() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = TransferService::new(repo.clone());
        let mut store = store_with("alice", Country::US, 1000);

        let err = service
            .transfer(&mut store, &Session::user("alice"), "ghost", Country::US, Decimal::ONE)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn test_exact_balance_is_sufficient() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = TransferService::new(repo);
        let mut store = AccountStore::new();
        store.insert("alice", Account::new("hash", Country::US, Decimal::new(1015, 1)));

        let receipt = service
            .transfer(&mut store, &Session::user("alice"), "alice", Country::US, Decimal::new(100, 0))
            .unwrap();
        assert!(receipt.balance_after.is_zero());
    }

    #[test]
    fn test_recipient_is_not_credited() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = TransferService::new(repo);
        let mut store = store_with("alice", Country::US, 1000);
        store.insert("bob", Account::new("hash", Country::India, Decimal::new(500, 0)));

        service
            .transfer(&mut store, &Session::user("alice"), "bob", Country::India, Decimal::new(10, 0))
            .unwrap();

        let bob = store.get("bob").unwrap();
        assert_eq!(bob.balance, Decimal::new(500, 0));
        assert!(bob.transaction_log.is_empty());
    }
}
