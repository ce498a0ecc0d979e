//! Auth service - sign-up, login and admin login
//!
//! Every successful path produces an explicit [`Session`]; nothing is kept
//! in global state. Failures never mutate the store.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, AccountStore, AdminCredential, Country, Session, LOG_CONTAINER_KEY};
use crate::ports::AccountRepository;

use super::credential::{CredentialService, Verification};

/// Result of a user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub session: Session,
    /// A plaintext credential was replaced by a hash during this login
    pub credential_upgraded: bool,
}

pub struct AuthService {
    repository: Arc<dyn AccountRepository>,
    credentials: Arc<CredentialService>,
    admin: Option<AdminCredential>,
    starting_balance: Decimal,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        credentials: Arc<CredentialService>,
        admin: Option<AdminCredential>,
        starting_balance: Decimal,
    ) -> Self {
        Self {
            repository,
            credentials,
            admin,
            starting_balance,
        }
    }

    /// Register a new account and persist the store
    ///
    /// The account starts with the configured balance and an empty log.
    pub fn sign_up(
        &self,
        store: &mut AccountStore,
        username: &str,
        password: &str,
        country: Country,
    ) -> Result<Session> {
        let username = validate_username(username)?;
        if password.is_empty() {
            return Err(Error::validation("password cannot be empty"));
        }
        if store.contains(username) {
            return Err(Error::DuplicateUser(username.to_string()));
        }

        let hash = self.credentials.hash_password(password)?;
        let account = Account::new(hash, country, self.starting_balance);
        if !store.insert(username, account) {
            return Err(Error::DuplicateUser(username.to_string()));
        }

        if let Err(e) = self.repository.save(store) {
            // Keep memory consistent with disk
            store.remove(username);
            return Err(e);
        }

        Ok(Session::user(username))
    }

    /// Authenticate a registered user
    ///
    /// Unknown usernames and wrong passwords produce the same error. A
    /// legacy plaintext credential is rehashed and the store persisted.
    pub fn login(
        &self,
        store: &mut AccountStore,
        username: &str,
        password: &str,
    ) -> Result<LoginResult> {
        let username = username.trim();
        let account = store.get(username).ok_or(Error::InvalidCredentials)?;

        match self.credentials.verify(password, &account.password) {
            Verification::Invalid => Err(Error::InvalidCredentials),
            Verification::Valid => Ok(LoginResult {
                session: Session::user(username),
                credential_upgraded: false,
            }),
            Verification::ValidLegacy => {
                let hash = self.credentials.hash_password(password)?;
                let previous = match store.get_mut(username) {
                    Some(account) => std::mem::replace(&mut account.password, hash),
                    None => return Err(Error::InvalidCredentials),
                };

                if let Err(e) = self.repository.save(store) {
                    if let Some(account) = store.get_mut(username) {
                        account.password = previous;
                    }
                    return Err(e);
                }

                Ok(LoginResult {
                    session: Session::user(username),
                    credential_upgraded: true,
                })
            }
        }
    }

    /// Authenticate the administrator against the injected credential
    pub fn admin_login(&self, username: &str, password: &str) -> Result<Session> {
        let admin = self.admin.as_ref().ok_or_else(|| {
            Error::Config("admin credential is not configured".to_string())
        })?;

        // Only hashed admin credentials are accepted
        if !CredentialService::is_hashed(&admin.password_hash) {
            return Err(Error::Config(
                "admin credential must be an argon2 hash".to_string(),
            ));
        }

        if username.trim() != admin.username {
            return Err(Error::InvalidCredentials);
        }
        match self.credentials.verify(password, &admin.password_hash) {
            Verification::Valid => Ok(Session::admin(admin.username.clone())),
            _ => Err(Error::InvalidCredentials),
        }
    }

    /// Build an admin credential for storing in settings
    pub fn make_admin_credential(&self, username: &str, password: &str) -> Result<AdminCredential> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::validation("admin username cannot be empty"));
        }
        if password.is_empty() {
            return Err(Error::validation("admin password cannot be empty"));
        }
        let hash = self.credentials.hash_password(password)?;
        Ok(AdminCredential::new(username, hash))
    }
}

fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::validation("username cannot be empty"));
    }
    if username == LOG_CONTAINER_KEY {
        return Err(Error::validation(format!(
            "'{}' is a reserved name",
            LOG_CONTAINER_KEY
        )));
    }
    Ok(username)
}
