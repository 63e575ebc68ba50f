//! # Admin Authorization
//!
//! Approving, rejecting and deleting events are admin actions. The managers
//! take an [`AdminGrant`] for those operations, and the only way to obtain
//! one is [`AdminKey::authorize`], which checks a presented token against an
//! Argon2 hash loaded from configuration.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use eyre::{eyre, Result};

use crate::errors::{EventError, EventResult};

/// Proof that the caller presented a valid admin token.
#[derive(Debug, Clone)]
pub struct AdminGrant {
    _private: (),
}

#[derive(Debug, Clone)]
pub struct AdminKey {
    hash: String,
}

impl AdminKey {
    /// Wraps an Argon2 PHC string, rejecting anything that does not parse.
    pub fn from_hash(hash: impl Into<String>) -> Result<Self> {
        let hash = hash.into();
        PasswordHash::new(&hash).map_err(|e| eyre!("Invalid admin key hash: {}", e))?;
        Ok(Self { hash })
    }

    pub fn authorize(&self, token: &str) -> EventResult<AdminGrant> {
        if token.is_empty() {
            return Err(EventError::Unauthorized("Admin token required".to_string()));
        }

        let parsed = PasswordHash::new(&self.hash)
            .map_err(|e| EventError::Dependency(eyre!("Invalid admin key hash: {}", e)))?;

        Argon2::default()
            .verify_password(token.as_bytes(), &parsed)
            .map(|_| AdminGrant { _private: () })
            .map_err(|_| EventError::Unauthorized("Invalid admin token".to_string()))
    }
}

/// Hashes a secret into the PHC string format stored in `ADMIN_KEY_HASH`.
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing secret: {}", e))?
        .to_string();

    Ok(hash)
}
