//! Credential service - password hashing and verification
//!
//! New credentials are Argon2id PHC strings with a random 16-byte salt.
//! Values that do not parse as a PHC string are legacy plaintext from
//! stores written before hashing existed; they still verify by equality so
//! the caller can upgrade them.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::Rng;

use crate::domain::result::{Error, Result};
use crate::domain::Argon2Params;

/// Outcome of checking a password against a stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Valid,
    /// Matched a plaintext credential; should be rehashed
    ValidLegacy,
    Invalid,
}

pub struct CredentialService {
    params: Argon2Params,
}

impl CredentialService {
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    fn hasher(&self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.params.memory_cost,
            self.params.time_cost,
            self.params.parallelism,
            None,
        )
        .map_err(|e| Error::Credential(format!("Failed to create argon2 params: {:?}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a password into a PHC string
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt_bytes: [u8; 16] = rand::thread_rng().gen();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| Error::Credential(format!("Failed to encode salt: {:?}", e)))?;

        let hash = self
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Credential(format!("Failed to hash password: {:?}", e)))?;

        Ok(hash.to_string())
    }

    /// Check `password` against a stored credential
    pub fn verify(&self, password: &str, stored: &str) -> Verification {
        match PasswordHash::new(stored) {
            // Cost parameters come from the stored hash itself
            Ok(parsed) => {
                if Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
                {
                    Verification::Valid
                } else {
                    Verification::Invalid
                }
            }
            Err(_) if !stored.is_empty() && stored == password => Verification::ValidLegacy,
            Err(_) => Verification::Invalid,
        }
    }

    /// Whether a stored credential is a hash rather than legacy plaintext
    pub fn is_hashed(stored: &str) -> bool {
        PasswordHash::new(stored).is_ok()
    }
}
