//! Person model and request shapes for the person sub-service.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// A person row: the author of notes and dishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: DbId,
    pub login: String,
    /// Stored credential; plaintext or an Argon2 PHC string depending on the
    /// configured [`CredentialScheme`](crate::credential::CredentialScheme).
    pub password: String,
    pub position: String,
}

/// Input for creating a person.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPerson {
    #[validate(length(min = 1, message = "login must not be empty"))]
    pub login: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[serde(default)]
    pub position: String,
}

/// Login attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub id: DbId,
    pub position: String,
}
