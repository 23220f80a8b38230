//! How person credentials are stored and compared.
//!
//! [`CredentialScheme::Plaintext`] stores the password as supplied and
//! compares by exact equality. [`CredentialScheme::Argon2`] stores an Argon2id
//! PHC string with a random salt. Switching an existing deployment from one
//! scheme to the other invalidates every stored credential.

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialScheme {
    #[default]
    Plaintext,
    Argon2,
}

impl CredentialScheme {
    /// Turn a supplied password into the value to persist.
    pub fn seal(self, password: &str) -> Result<String, CoreError> {
        match self {
            Self::Plaintext => Ok(password.to_string()),
            Self::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))
            }
        }
    }

    /// Compare a supplied password with the persisted value.
    pub fn verify(self, supplied: &str, stored: &str) -> Result<bool, CoreError> {
        match self {
            Self::Plaintext => Ok(supplied == stored),
            Self::Argon2 => {
                let parsed = PasswordHash::new(stored).map_err(|e| {
                    CoreError::Internal(format!("Stored credential is not a PHC string: {e}"))
                })?;
                match Argon2::default().verify_password(supplied.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(CoreError::Internal(format!(
                        "Password verification error: {e}"
                    ))),
                }
            }
        }
    }
}

impl fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext => f.write_str("plaintext"),
            Self::Argon2 => f.write_str("argon2"),
        }
    }
}

impl FromStr for CredentialScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plaintext" => Ok(Self::Plaintext),
            "argon2" => Ok(Self::Argon2),
            other => Err(format!("unknown credential scheme '{other}'")),
        }
    }
}
