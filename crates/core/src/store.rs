//! Storage ports.
//!
//! The services never issue SQL themselves. They call these traits, which the
//! Postgres adapter in `dishnote-db` implements (and an in-memory double under
//! the `test-support` feature). "No rows" is always `Ok(None)` / `Ok(false)`,
//! never an error.

use std::future::Future;

use crate::dish::Dish;
use crate::note::Note;
use crate::person::Person;
use crate::record::{Record, RecordKind};
use crate::types::{DbId, Timestamp};

/// Which uniqueness or reference rule a write collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKey {
    /// Primary key of the target table.
    Id,
    /// Unique login of a person.
    Login,
    /// Author foreign key of a record.
    Author,
}

/// Failure reported by a storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not be reached, or the statement could not run.
    #[error("{0}")]
    Unavailable(String),

    /// A write was rejected by a constraint.
    #[error("constraint violated on {key:?}")]
    Conflict { key: ConflictKey },
}

/// Persistence of one record kind.
pub trait RecordStore<K: RecordKind>: Send + Sync {
    fn record_exists(&self, id: DbId) -> impl Future<Output = Result<bool, StorageError>> + Send;

    fn find_record(
        &self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Record<K::Info>>, StorageError>> + Send;

    fn insert_record(
        &self,
        record: &Record<K::Info>,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Overwrite every info field and `updated_at`. Returns `false` when no
    /// row matched `id`.
    fn update_record(
        &self,
        id: DbId,
        info: &K::Info,
        updated_at: Timestamp,
    ) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// Returns `false` when no row matched `id`.
    fn delete_record(&self, id: DbId) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// All records, or only those whose author equals `author`.
    fn list_records(
        &self,
        author: Option<DbId>,
    ) -> impl Future<Output = Result<Vec<Record<K::Info>>, StorageError>> + Send;
}

/// Persistence of persons.
pub trait PersonStore: Send + Sync {
    fn person_exists(&self, id: DbId) -> impl Future<Output = Result<bool, StorageError>> + Send;

    fn find_person_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<Person>, StorageError>> + Send;

    fn insert_person(&self, person: &Person)
        -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Returns `false` when no row matched `id`.
    fn update_position(
        &self,
        id: DbId,
        position: &str,
    ) -> impl Future<Output = Result<bool, StorageError>> + Send;
}

/// Everything the service layer needs from one backend.
pub trait Storage:
    PersonStore + RecordStore<Note> + RecordStore<Dish> + Clone + Send + Sync + 'static
{
    /// Cheap round trip used by health checks.
    fn ping(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
