//! Test doubles for the storage ports, identifier source and clock.
//!
//! [`MemoryStore`] enforces the same constraints the Postgres schema does
//! (primary keys, unique login, author foreign key) so service tests observe
//! the same error kinds. Each instance owns its own tables.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration};

use crate::allocator::IdSource;
use crate::clock::Clock;
use crate::dish::{Dish, DishInfo};
use crate::note::{Note, NoteInfo};
use crate::person::Person;
use crate::record::{Record, RecordKind};
use crate::store::{ConflictKey, PersonStore, RecordStore, Storage, StorageError};
use crate::types::{DbId, Timestamp};

/// Build a [`Person`] row with a plaintext credential.
pub fn person(id: DbId, login: &str, password: &str, position: &str) -> Person {
    Person {
        id,
        login: login.to_string(),
        password: password.to_string(),
        position: position.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Identifier source
// ---------------------------------------------------------------------------

/// Yields a fixed sequence of candidates, then repeats the last one.
#[derive(Debug)]
pub struct ScriptedIds {
    queue: Mutex<VecDeque<DbId>>,
    last: AtomicI64,
}

impl ScriptedIds {
    pub fn new(ids: impl IntoIterator<Item = DbId>) -> Self {
        let queue: VecDeque<DbId> = ids.into_iter().collect();
        let last = queue.back().copied().unwrap_or(1);
        Self {
            queue: Mutex::new(queue),
            last: AtomicI64::new(last),
        }
    }
}

impl IdSource for ScriptedIds {
    fn candidate(&self) -> DbId {
        let next = self
            .queue
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());
        next.unwrap_or_else(|| self.last.load(Ordering::SeqCst))
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Advances one second on every reading, starting from a fixed instant.
#[derive(Debug)]
pub struct SteppingClock {
    start: Timestamp,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(DateTime::from_timestamp(1_767_225_600, 0).unwrap_or_default())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Tables {
    persons: BTreeMap<DbId, Person>,
    notes: Table<NoteInfo>,
    dishes: Table<DishInfo>,
    /// Persons injected right before the next person insert.
    pending_persons: Vec<Person>,
    /// Persons removed right before the next record insert of any kind.
    pending_removals: Vec<DbId>,
    unavailable: bool,
}

#[derive(Debug)]
pub struct Table<I> {
    rows: BTreeMap<DbId, Record<I>>,
    /// Rows injected right before the next insert, simulating a concurrent writer.
    pending_claims: Vec<Record<I>>,
}

impl<I> Default for Table<I> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            pending_claims: Vec::new(),
        }
    }
}

/// Maps a record kind onto its in-memory table.
pub trait MemoryTable: RecordKind {
    fn table(tables: &mut Tables) -> &mut Table<Self::Info>;
}

impl MemoryTable for Note {
    fn table(tables: &mut Tables) -> &mut Table<NoteInfo> {
        &mut tables.notes
    }
}

impl MemoryTable for Dish {
    fn table(tables: &mut Tables) -> &mut Table<DishInfo> {
        &mut tables.dishes
    }
}

/// In-memory [`Storage`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a person row directly, bypassing the service.
    pub fn seed_person(&self, person: Person) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.persons.insert(person.id, person);
        }
    }

    /// Stored person row, if any.
    pub fn person(&self, id: DbId) -> Option<Person> {
        self.tables
            .lock()
            .ok()
            .and_then(|tables| tables.persons.get(&id).cloned())
    }

    /// Make every subsequent call fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.unavailable = unavailable;
        }
    }

    /// Have a row with `id` appear just before the next insert of kind `K`.
    pub fn claim_on_next_insert<K: MemoryTable>(&self, id: DbId, info: K::Info) {
        if let Ok(mut tables) = self.tables.lock() {
            let at = DateTime::from_timestamp(0, 0).unwrap_or_default();
            K::table(&mut tables).pending_claims.push(Record {
                id,
                info,
                created_at: at,
                updated_at: at,
            });
        }
    }

    /// Have `person` appear just before the next person insert.
    pub fn claim_person_on_next_insert(&self, person: Person) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.pending_persons.push(person);
        }
    }

    /// Have person `id` vanish just before the next record insert.
    pub fn remove_person_on_next_insert(&self, id: DbId) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.pending_removals.push(id);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".into()))?;
        if tables.unavailable {
            return Err(StorageError::Unavailable("connection refused".into()));
        }
        Ok(tables)
    }
}

impl<K: MemoryTable> RecordStore<K> for MemoryStore {
    async fn record_exists(&self, id: DbId) -> Result<bool, StorageError> {
        let mut tables = self.lock()?;
        Ok(K::table(&mut tables).rows.contains_key(&id))
    }

    async fn find_record(&self, id: DbId) -> Result<Option<Record<K::Info>>, StorageError> {
        let mut tables = self.lock()?;
        Ok(K::table(&mut tables).rows.get(&id).cloned())
    }

    async fn insert_record(&self, record: &Record<K::Info>) -> Result<(), StorageError> {
        let mut tables = self.lock()?;
        for id in std::mem::take(&mut tables.pending_removals) {
            tables.persons.remove(&id);
        }
        if !tables.persons.contains_key(&K::author(&record.info)) {
            return Err(StorageError::Conflict {
                key: ConflictKey::Author,
            });
        }
        let table = K::table(&mut tables);
        for claim in std::mem::take(&mut table.pending_claims) {
            table.rows.insert(claim.id, claim);
        }
        if table.rows.contains_key(&record.id) {
            return Err(StorageError::Conflict {
                key: ConflictKey::Id,
            });
        }
        table.rows.insert(record.id, record.clone());
        Ok(())
    }

    async fn update_record(
        &self,
        id: DbId,
        info: &K::Info,
        updated_at: Timestamp,
    ) -> Result<bool, StorageError> {
        let mut tables = self.lock()?;
        if !tables.persons.contains_key(&K::author(info)) {
            return Err(StorageError::Conflict {
                key: ConflictKey::Author,
            });
        }
        match K::table(&mut tables).rows.get_mut(&id) {
            Some(row) => {
                row.info = info.clone();
                row.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_record(&self, id: DbId) -> Result<bool, StorageError> {
        let mut tables = self.lock()?;
        Ok(K::table(&mut tables).rows.remove(&id).is_some())
    }

    async fn list_records(
        &self,
        author: Option<DbId>,
    ) -> Result<Vec<Record<K::Info>>, StorageError> {
        let mut tables = self.lock()?;
        Ok(K::table(&mut tables)
            .rows
            .values()
            .filter(|row| author.is_none_or(|a| K::author(&row.info) == a))
            .cloned()
            .collect())
    }
}

impl PersonStore for MemoryStore {
    async fn person_exists(&self, id: DbId) -> Result<bool, StorageError> {
        Ok(self.lock()?.persons.contains_key(&id))
    }

    async fn find_person_by_login(&self, login: &str) -> Result<Option<Person>, StorageError> {
        Ok(self
            .lock()?
            .persons
            .values()
            .find(|p| p.login == login)
            .cloned())
    }

    async fn insert_person(&self, person: &Person) -> Result<(), StorageError> {
        let mut tables = self.lock()?;
        for claim in std::mem::take(&mut tables.pending_persons) {
            tables.persons.insert(claim.id, claim);
        }
        if tables.persons.contains_key(&person.id) {
            return Err(StorageError::Conflict {
                key: ConflictKey::Id,
            });
        }
        if tables.persons.values().any(|p| p.login == person.login) {
            return Err(StorageError::Conflict {
                key: ConflictKey::Login,
            });
        }
        tables.persons.insert(person.id, person.clone());
        Ok(())
    }

    async fn update_position(&self, id: DbId, position: &str) -> Result<bool, StorageError> {
        let mut tables = self.lock()?;
        match tables.persons.get_mut(&id) {
            Some(person) => {
                person.position = position.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Storage for MemoryStore {
    async fn ping(&self) -> Result<(), StorageError> {
        self.lock().map(|_| ())
    }
}
