//! Generic CRUD service for one record kind.
//!
//! Every operation validates before it writes, so a failed call never leaves
//! a partial row behind. Nothing here opens a transaction; see
//! [`allocator`](crate::allocator) for the resulting identifier race.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::allocator::IdAllocator;
use crate::clock::Clock;
use crate::error::CoreError;
use crate::record::{Record, RecordKind};
use crate::store::{ConflictKey, PersonStore, RecordStore, StorageError};
use crate::types::DbId;

pub struct EntityService<K, S> {
    store: S,
    allocator: IdAllocator,
    clock: Arc<dyn Clock>,
    _kind: PhantomData<fn() -> K>,
}

impl<K, S: Clone> Clone for EntityService<K, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            allocator: self.allocator.clone(),
            clock: Arc::clone(&self.clock),
            _kind: PhantomData,
        }
    }
}

impl<K, S> EntityService<K, S>
where
    K: RecordKind,
    S: RecordStore<K> + PersonStore,
{
    pub fn new(store: S, allocator: IdAllocator, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            allocator,
            clock,
            _kind: PhantomData,
        }
    }

    /// Fetch the full snapshot of record `id`.
    pub async fn get(&self, id: DbId) -> Result<Record<K::Info>, CoreError> {
        self.store
            .find_record(id)
            .await?
            .ok_or_else(|| CoreError::not_found(K::ENTITY, id))
    }

    /// Store a new record and return its freshly allocated identifier.
    pub async fn create(&self, info: K::Info) -> Result<DbId, CoreError> {
        let id = self
            .allocator
            .allocate(K::ENTITY, |candidate| self.store.record_exists(candidate))
            .await?;

        let author = K::author(&info);
        self.ensure_author(author).await?;

        let now = self.clock.now();
        let record = Record {
            id,
            info,
            created_at: now,
            updated_at: now,
        };
        self.store
            .insert_record(&record)
            .await
            .map_err(|e| author_conflict(e, author))?;

        tracing::info!(entity = K::ENTITY, id, author, "Record created");
        Ok(id)
    }

    /// Merge `patch` into record `id` and write back the full row.
    pub async fn update(&self, id: DbId, patch: K::Patch) -> Result<(), CoreError> {
        let current = self.get(id).await?;

        if let Some(author) = K::patch_author(&patch) {
            self.ensure_author(author).await?;
        }

        let merged = K::merge(current.info, patch);
        let updated_at = self.clock.now().max(current.created_at);

        let matched = self
            .store
            .update_record(id, &merged, updated_at)
            .await
            .map_err(|e| author_conflict(e, K::author(&merged)))?;
        if !matched {
            return Err(CoreError::not_found(K::ENTITY, id));
        }

        tracing::info!(entity = K::ENTITY, id, "Record updated");
        Ok(())
    }

    /// Remove record `id`. Deleting an absent record is `NotFound`.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if !self.store.record_exists(id).await? {
            return Err(CoreError::not_found(K::ENTITY, id));
        }
        if !self.store.delete_record(id).await? {
            return Err(CoreError::not_found(K::ENTITY, id));
        }

        tracing::info!(entity = K::ENTITY, id, "Record deleted");
        Ok(())
    }

    /// All records, or those authored by `author` when given.
    ///
    /// An unknown `author` is `InvalidAuthor`; a known author with no records
    /// yields an empty list.
    pub async fn list(&self, author: Option<DbId>) -> Result<Vec<Record<K::Info>>, CoreError> {
        if let Some(author) = author {
            self.ensure_author(author).await?;
        }
        Ok(self.store.list_records(author).await?)
    }

    async fn ensure_author(&self, author: DbId) -> Result<(), CoreError> {
        if self.store.person_exists(author).await? {
            Ok(())
        } else {
            Err(CoreError::InvalidAuthor(author))
        }
    }
}

/// A foreign key rejection means the author vanished after validation.
fn author_conflict(err: StorageError, author: DbId) -> CoreError {
    match err {
        StorageError::Conflict {
            key: ConflictKey::Author,
        } => CoreError::InvalidAuthor(author),
        other => other.into(),
    }
}
