//! Session domain model

use serde::{Deserialize, Serialize};

/// Role granted by a successful login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// An authenticated identity
///
/// Sessions are only produced by the auth service. Dropping one is the
/// "return to start" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    identity: String,
    role: Role,
}

impl Session {
    pub(crate) fn user(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            role: Role::User,
        }
    }

    pub(crate) fn admin(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            role: Role::Admin,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
