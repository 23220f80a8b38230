//! [`PgStore`]: the storage ports backed by the repositories.

use dishnote_core::dish::{Dish, DishInfo};
use dishnote_core::note::{Note, NoteInfo};
use dishnote_core::person::Person;
use dishnote_core::record::Record;
use dishnote_core::store::{PersonStore, RecordStore, Storage, StorageError};
use dishnote_core::types::{DbId, Timestamp};

use crate::error::storage_error;
use crate::repositories::{DishRepo, NoteRepo, PersonRepo};
use crate::DbPool;

/// Storage backed by a PostgreSQL pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RecordStore<Note> for PgStore {
    async fn record_exists(&self, id: DbId) -> Result<bool, StorageError> {
        NoteRepo::exists(&self.pool, id).await.map_err(storage_error)
    }

    async fn find_record(&self, id: DbId) -> Result<Option<Record<NoteInfo>>, StorageError> {
        let row = NoteRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Record::from))
    }

    async fn insert_record(&self, record: &Record<NoteInfo>) -> Result<(), StorageError> {
        NoteRepo::create(
            &self.pool,
            record.id,
            &record.info,
            record.created_at,
            record.updated_at,
        )
        .await
        .map_err(storage_error)
    }

    async fn update_record(
        &self,
        id: DbId,
        info: &NoteInfo,
        updated_at: Timestamp,
    ) -> Result<bool, StorageError> {
        NoteRepo::update(&self.pool, id, info, updated_at)
            .await
            .map_err(storage_error)
    }

    async fn delete_record(&self, id: DbId) -> Result<bool, StorageError> {
        NoteRepo::delete(&self.pool, id).await.map_err(storage_error)
    }

    async fn list_records(
        &self,
        author: Option<DbId>,
    ) -> Result<Vec<Record<NoteInfo>>, StorageError> {
        let rows = NoteRepo::list(&self.pool, author)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(Record::from).collect())
    }
}

impl RecordStore<Dish> for PgStore {
    async fn record_exists(&self, id: DbId) -> Result<bool, StorageError> {
        DishRepo::exists(&self.pool, id).await.map_err(storage_error)
    }

    async fn find_record(&self, id: DbId) -> Result<Option<Record<DishInfo>>, StorageError> {
        let row = DishRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Record::from))
    }

    async fn insert_record(&self, record: &Record<DishInfo>) -> Result<(), StorageError> {
        DishRepo::create(
            &self.pool,
            record.id,
            &record.info,
            record.created_at,
            record.updated_at,
        )
        .await
        .map_err(storage_error)
    }

    async fn update_record(
        &self,
        id: DbId,
        info: &DishInfo,
        updated_at: Timestamp,
    ) -> Result<bool, StorageError> {
        DishRepo::update(&self.pool, id, info, updated_at)
            .await
            .map_err(storage_error)
    }

    async fn delete_record(&self, id: DbId) -> Result<bool, StorageError> {
        DishRepo::delete(&self.pool, id).await.map_err(storage_error)
    }

    async fn list_records(
        &self,
        author: Option<DbId>,
    ) -> Result<Vec<Record<DishInfo>>, StorageError> {
        let rows = DishRepo::list(&self.pool, author)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(Record::from).collect())
    }
}

impl PersonStore for PgStore {
    async fn person_exists(&self, id: DbId) -> Result<bool, StorageError> {
        PersonRepo::exists(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn find_person_by_login(&self, login: &str) -> Result<Option<Person>, StorageError> {
        let row = PersonRepo::find_by_login(&self.pool, login)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Person::from))
    }

    async fn insert_person(&self, person: &Person) -> Result<(), StorageError> {
        PersonRepo::create(&self.pool, person)
            .await
            .map_err(storage_error)
    }

    async fn update_position(&self, id: DbId, position: &str) -> Result<bool, StorageError> {
        PersonRepo::update_position(&self.pool, id, position)
            .await
            .map_err(storage_error)
    }
}

impl Storage for PgStore {
    async fn ping(&self) -> Result<(), StorageError> {
        crate::health_check(&self.pool)
            .await
            .map_err(storage_error)
    }
}
