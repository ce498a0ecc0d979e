//! Configuration management
//!
//! Settings live in settings.json in the data directory:
//! ```json
//! {
//!   "app": { "storeFile": "user_data.json", "startingBalance": 100000 },
//!   "admin": { "username": "admin01", "passwordHash": "$argon2id$..." },
//!   "argon2": { "timeCost": 3, "memoryCost": 65536, "parallelism": 4 }
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{AdminCredential, Argon2Params};

pub const SETTINGS_FILENAME: &str = "settings.json";
pub const DEFAULT_STORE_FILE: &str = "user_data.json";

/// Balance every new account starts with, in its own currency
pub fn default_starting_balance() -> Decimal {
    Decimal::new(100000, 0)
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin: Option<AdminCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    argon2: Option<Argon2Params>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    store_file: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    starting_balance: Option<Decimal>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Remit configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub store_file: String,
    pub starting_balance: Decimal,
    pub admin: Option<AdminCredential>,
    pub argon2: Argon2Params,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_file: DEFAULT_STORE_FILE.to_string(),
            starting_balance: default_starting_balance(),
            admin: None,
            argon2: Argon2Params::default(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// Environment variables override the file:
    /// REMIT_STORE_FILE, REMIT_STARTING_BALANCE, REMIT_ADMIN_USERNAME and
    /// REMIT_ADMIN_PASSWORD_HASH (the latter two only together).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let store_file = std::env::var("REMIT_STORE_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or(raw.app.store_file)
            .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());

        let starting_balance = match std::env::var("REMIT_STARTING_BALANCE").ok() {
            Some(value) => Decimal::from_str(value.trim())
                .with_context(|| format!("Invalid REMIT_STARTING_BALANCE: {}", value))?,
            None => raw
                .app
                .starting_balance
                .unwrap_or_else(default_starting_balance),
        };
        if starting_balance.is_sign_negative() && !starting_balance.is_zero() {
            anyhow::bail!("Starting balance cannot be negative");
        }

        let admin = match (
            std::env::var("REMIT_ADMIN_USERNAME").ok(),
            std::env::var("REMIT_ADMIN_PASSWORD_HASH").ok(),
        ) {
            (Some(username), Some(hash)) => Some(AdminCredential::new(username, hash)),
            _ => raw.admin,
        };

        Ok(Self {
            store_file,
            starting_balance,
            admin,
            argon2: raw.argon2.unwrap_or_default(),
        })
    }

    /// Save config to the data directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILENAME);
        let mut settings = read_settings(data_dir)?;

        // Update only the fields we manage
        settings.app.store_file = Some(self.store_file.clone());
        settings.app.starting_balance = Some(self.starting_balance);
        settings.admin = self.admin.clone();
        settings.argon2 = Some(self.argon2);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write settings: {:?}", settings_path))?;
        Ok(())
    }

    /// Path of the account store document
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        let path = Path::new(&self.store_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            data_dir.join(path)
        }
    }

    /// Replace the administrator credential
    pub fn set_admin(&mut self, credential: AdminCredential) {
        self.admin = Some(credential);
    }
}

/// Read settings.json; a missing or unparsable file yields defaults
fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILENAME);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read settings: {:?}", settings_path))?;
    // Flattened fields only see plain numbers when read from a Value
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(_) => return Ok(SettingsFile::default()),
    };
    Ok(serde_json::from_value(value).unwrap_or_default())
}
