use std::fmt::Display;

use crate::store::{ConflictKey, StorageError};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Author {0} does not exist")]
    InvalidAuthor(DbId),

    #[error("Login '{0}' is already taken")]
    DuplicateLogin(String),

    #[error("Invalid login or password")]
    InvalidCredential,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// A `NotFound` for a lookup by numeric identifier.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound {
            entity,
            key: format!("id {id}"),
        }
    }

    /// A `NotFound` for a lookup by an arbitrary key (e.g. a login).
    pub fn not_found_by(entity: &'static str, field: &str, value: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: format!("{field} '{value}'"),
        }
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => Self::StorageUnavailable(msg),
            StorageError::Conflict { key } => match key {
                ConflictKey::Id => Self::Conflict("identifier already in use".into()),
                ConflictKey::Login => Self::Conflict("login already in use".into()),
                ConflictKey::Author => {
                    Self::Conflict("author reference no longer resolves".into())
                }
            },
        }
    }
}
