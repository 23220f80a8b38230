//! Classification of sqlx errors into storage-port errors.

use dishnote_core::store::{ConflictKey, StorageError};

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Map a sqlx error onto [`StorageError`].
///
/// - Unique violations on `uq_persons_login` become `Conflict { Login }`.
/// - Unique violations on a `*_pkey` constraint become `Conflict { Id }`.
/// - Foreign key violations (author references) become `Conflict { Author }`.
/// - Everything else is `Unavailable`.
pub fn storage_error(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        let constraint = db_err.constraint().unwrap_or_default();
        match code.as_deref() {
            Some(UNIQUE_VIOLATION) if constraint == "uq_persons_login" => {
                return StorageError::Conflict {
                    key: ConflictKey::Login,
                };
            }
            Some(UNIQUE_VIOLATION) if constraint.ends_with("_pkey") => {
                return StorageError::Conflict {
                    key: ConflictKey::Id,
                };
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return StorageError::Conflict {
                    key: ConflictKey::Author,
                };
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    StorageError::Unavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pool_timeout_is_unavailable() {
        assert_matches!(
            storage_error(sqlx::Error::PoolTimedOut),
            StorageError::Unavailable(_)
        );
    }

    #[test]
    fn row_not_found_is_unavailable() {
        // Repositories use fetch_optional, so a RowNotFound reaching this
        // point means a statement misbehaved.
        assert_matches!(
            storage_error(sqlx::Error::RowNotFound),
            StorageError::Unavailable(_)
        );
    }
}
