use std::sync::Arc;

use axum::extract::FromRef;
use dishnote_core::allocator::IdAllocator;
use dishnote_core::clock::{Clock, SystemClock};
use dishnote_core::dish::Dish;
use dishnote_core::note::Note;
use dishnote_core::person_service::PersonService;
use dishnote_core::service::EntityService;
use dishnote_core::store::Storage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState<S>>`.
///
/// Generic over the storage backend so integration tests can run the full
/// router against an in-memory store. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState<S> {
    /// Storage backend, used directly only by the health check.
    pub store: S,
    pub notes: EntityService<Note, S>,
    pub dishes: EntityService<Dish, S>,
    pub persons: PersonService<S>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl<S: Storage> AppState<S> {
    /// Wire services over `store` with a random allocator and the wall clock.
    pub fn new(store: S, config: ServerConfig) -> Self {
        let allocator = IdAllocator::new(config.id_allocation_max_attempts);
        Self::with_parts(store, config, allocator, Arc::new(SystemClock))
    }

    /// Wire services with an explicit allocator and clock.
    pub fn with_parts(
        store: S,
        config: ServerConfig,
        allocator: IdAllocator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notes: EntityService::new(store.clone(), allocator.clone(), Arc::clone(&clock)),
            dishes: EntityService::new(store.clone(), allocator.clone(), clock),
            persons: PersonService::new(store.clone(), allocator, config.credential_scheme),
            store,
            config: Arc::new(config),
        }
    }
}

impl<S: Storage> FromRef<AppState<S>> for EntityService<Note, S> {
    fn from_ref(state: &AppState<S>) -> Self {
        state.notes.clone()
    }
}

impl<S: Storage> FromRef<AppState<S>> for EntityService<Dish, S> {
    fn from_ref(state: &AppState<S>) -> Self {
        state.dishes.clone()
    }
}

impl<S: Storage> FromRef<AppState<S>> for PersonService<S> {
    fn from_ref(state: &AppState<S>) -> Self {
        state.persons.clone()
    }
}
