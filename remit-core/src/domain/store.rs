//! Account store - the whole persisted document
//!
//! On disk the store is one JSON object keyed by username. One extra key,
//! [`LOG_CONTAINER_KEY`], holds a list that is never an account; it is
//! carried through load/save verbatim.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use super::account::Account;

/// Reserved top-level key that is not a username
pub const LOG_CONTAINER_KEY: &str = "transaction_log";

/// In-memory view of every account, loaded and saved wholesale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountStore {
    accounts: BTreeMap<String, Account>,
    log_container: Vec<JsonValue>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn get_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.accounts.get_mut(username)
    }

    /// Insert an account; returns `false` and leaves the store untouched
    /// when the username is taken
    pub fn insert(&mut self, username: impl Into<String>, account: Account) -> bool {
        let username = username.into();
        if username == LOG_CONTAINER_KEY || self.accounts.contains_key(&username) {
            return false;
        }
        self.accounts.insert(username, account);
        true
    }

    pub fn remove(&mut self, username: &str) -> Option<Account> {
        self.accounts.remove(username)
    }

    /// Accounts in username order, sentinel excluded
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Account)> {
        self.accounts.iter()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Serialize for AccountStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.accounts.len() + 1))?;
        for (username, account) in &self.accounts {
            map.serialize_entry(username, account)?;
        }
        map.serialize_entry(LOG_CONTAINER_KEY, &self.log_container)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AccountStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, JsonValue>::deserialize(deserializer)?;
        let mut store = AccountStore::new();

        for (key, value) in raw {
            if key == LOG_CONTAINER_KEY {
                // Anything other than a list is dropped and recreated empty
                if let JsonValue::Array(items) = value {
                    store.log_container = items;
                }
                continue;
            }
            let account: Account = serde_json::from_value(value)
                .map_err(|e| D::Error::custom(format!("account '{}': {}", key, e)))?;
            account
                .validate()
                .map_err(|e| D::Error::custom(format!("account '{}': {}", key, e)))?;
            store.accounts.insert(key, account);
        }

        Ok(store)
    }
}
