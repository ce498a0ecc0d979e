//! Admin service - read-only aggregation over the account store

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{AccountStore, Country, Currency, Session, Transaction};

/// One account as shown on the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub username: String,
    pub country: Country,
    pub currency: Currency,
    pub balance: Decimal,
    pub formatted_balance: String,
    pub transaction_log: Vec<Transaction>,
}

/// A logged transaction together with the account that made it
#[derive(Debug, Clone, Serialize)]
pub struct TransactionEntry {
    pub username: String,
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// Totals shown at the top of the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub total_fees: Decimal,
    pub formatted_total_fees: String,
    pub account_count: usize,
    pub transaction_count: usize,
}

/// Platform earnings from transfer fees
///
/// Each logged transaction contributes the fee of its account's *current*
/// country, not the fee stored on the transaction.
pub fn compute_total_fees(store: &AccountStore) -> Decimal {
    store
        .iter()
        .map(|(_, account)| {
            account.country.transaction_fee() * Decimal::from(account.transaction_log.len())
        })
        .sum()
}

/// Earnings label; always rupee-prefixed, two decimals
pub fn format_earnings(total: Decimal) -> String {
    format!("₹{:.2}", total)
}

/// Every account in username order
pub fn list_accounts(store: &AccountStore) -> Vec<AccountSummary> {
    store
        .iter()
        .map(|(username, account)| AccountSummary {
            username: username.clone(),
            country: account.country,
            currency: account.currency(),
            balance: account.balance,
            formatted_balance: account.formatted_balance(),
            transaction_log: account.transaction_log.clone(),
        })
        .collect()
}

/// Every logged transaction, grouped by account in username order
pub fn list_transactions(store: &AccountStore) -> Vec<TransactionEntry> {
    store
        .iter()
        .flat_map(|(username, account)| {
            account.transaction_log.iter().map(move |tx| TransactionEntry {
                username: username.clone(),
                transaction: tx.clone(),
            })
        })
        .collect()
}

/// Admin view gated on an admin session
#[derive(Debug, Default)]
pub struct AdminService;

impl AdminService {
    pub fn new() -> Self {
        Self
    }

    fn require_admin(session: &Session) -> Result<()> {
        if session.is_admin() {
            Ok(())
        } else {
            Err(Error::unauthorized("admin session required"))
        }
    }

    pub fn dashboard(&self, store: &AccountStore, session: &Session) -> Result<AdminDashboard> {
        Self::require_admin(session)?;
        let total_fees = compute_total_fees(store);
        Ok(AdminDashboard {
            total_fees,
            formatted_total_fees: format_earnings(total_fees),
            account_count: store.len(),
            transaction_count: store.iter().map(|(_, a)| a.transaction_log.len()).sum(),
        })
    }

    pub fn accounts(&self, store: &AccountStore, session: &Session) -> Result<Vec<AccountSummary>> {
        Self::require_admin(session)?;
        Ok(list_accounts(store))
    }

    pub fn transactions(
        &self,
        store: &AccountStore,
        session: &Session,
    ) -> Result<Vec<TransactionEntry>> {
        Self::require_admin(session)?;
        Ok(list_transactions(store))
    }
}
