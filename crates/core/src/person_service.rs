//! Person sub-service: registration, login and position changes.

use validator::Validate;

use crate::allocator::IdAllocator;
use crate::credential::CredentialScheme;
use crate::error::CoreError;
use crate::person::{Credentials, LoginOutcome, NewPerson, Person};
use crate::store::{ConflictKey, PersonStore, StorageError};
use crate::types::DbId;

const ENTITY: &str = "Person";

#[derive(Clone)]
pub struct PersonService<S> {
    store: S,
    allocator: IdAllocator,
    scheme: CredentialScheme,
}

impl<S: PersonStore> PersonService<S> {
    pub fn new(store: S, allocator: IdAllocator, scheme: CredentialScheme) -> Self {
        Self {
            store,
            allocator,
            scheme,
        }
    }

    /// Register a person and return the allocated identifier.
    ///
    /// Fails with `DuplicateLogin` if the login is already taken, whether
    /// detected by the lookup or by the storage unique index.
    pub async fn create_person(&self, input: NewPerson) -> Result<DbId, CoreError> {
        input
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let id = self
            .allocator
            .allocate(ENTITY, |candidate| self.store.person_exists(candidate))
            .await?;

        if self.store.find_person_by_login(&input.login).await?.is_some() {
            return Err(CoreError::DuplicateLogin(input.login));
        }

        let person = Person {
            id,
            password: self.scheme.seal(&input.password)?,
            login: input.login,
            position: input.position,
        };
        self.store
            .insert_person(&person)
            .await
            .map_err(|e| match e {
                StorageError::Conflict {
                    key: ConflictKey::Login,
                } => CoreError::DuplicateLogin(person.login.clone()),
                other => other.into(),
            })?;

        tracing::info!(id, login = %person.login, "Person created");
        Ok(id)
    }

    /// Check a login/password pair, returning the person's id and position.
    pub async fn log_in(&self, credentials: Credentials) -> Result<LoginOutcome, CoreError> {
        let person = self
            .store
            .find_person_by_login(&credentials.login)
            .await?
            .ok_or_else(|| CoreError::not_found_by(ENTITY, "login", &credentials.login))?;

        if !self.scheme.verify(&credentials.password, &person.password)? {
            tracing::debug!(id = person.id, "Rejected login attempt");
            return Err(CoreError::InvalidCredential);
        }

        Ok(LoginOutcome {
            id: person.id,
            position: person.position,
        })
    }

    /// Overwrite the position of person `id` and echo the new value.
    pub async fn change_position(&self, id: DbId, position: String) -> Result<String, CoreError> {
        if !self.store.person_exists(id).await? {
            return Err(CoreError::not_found(ENTITY, id));
        }
        if !self.store.update_position(id, &position).await? {
            return Err(CoreError::not_found(ENTITY, id));
        }

        tracing::info!(id, position = %position, "Person position changed");
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::{MemoryStore, ScriptedIds};

    fn new_person(login: &str, password: &str, position: &str) -> NewPerson {
        NewPerson {
            login: login.into(),
            password: password.into(),
            position: position.into(),
        }
    }

    fn credentials(login: &str, password: &str) -> Credentials {
        Credentials {
            login: login.into(),
            password: password.into(),
        }
    }

    fn service(store: &MemoryStore) -> PersonService<MemoryStore> {
        PersonService::new(
            store.clone(),
            IdAllocator::default(),
            CredentialScheme::Plaintext,
        )
    }

    #[tokio::test]
    async fn create_and_log_in() {
        let store = MemoryStore::new();
        let persons = service(&store);

        let id = persons
            .create_person(new_person("alice", "p1", "chef"))
            .await
            .unwrap();
        let outcome = persons.log_in(credentials("alice", "p1")).await.unwrap();

        assert_eq!(
            outcome,
            LoginOutcome {
                id,
                position: "chef".into()
            }
        );
    }

    #[tokio::test]
    async fn duplicate_login_is_rejected() {
        let store = MemoryStore::new();
        let persons = service(&store);
        persons
            .create_person(new_person("alice", "p1", "chef"))
            .await
            .unwrap();

        let result = persons
            .create_person(new_person("alice", "other", "waiter"))
            .await;

        assert_matches!(result, Err(CoreError::DuplicateLogin(login)) if login == "alice");
    }

    #[tokio::test]
    async fn login_taken_before_insert_surfaces_as_duplicate() {
        let store = MemoryStore::new();
        let persons = PersonService::new(
            store.clone(),
            IdAllocator::with_source(Arc::new(ScriptedIds::new([5])), 4),
            CredentialScheme::Plaintext,
        );
        // Another registration for "alice" lands between the lookup and the insert.
        store.claim_person_on_next_insert(crate::testing::person(9, "alice", "p0", "waiter"));

        assert_matches!(
            persons.create_person(new_person("alice", "p1", "chef")).await,
            Err(CoreError::DuplicateLogin(login)) if login == "alice"
        );
        assert_eq!(store.person(5), None);
        assert_eq!(store.person(9).unwrap().position, "waiter");
    }

    #[tokio::test]
    async fn logins_are_case_sensitive() {
        let store = MemoryStore::new();
        let persons = service(&store);
        persons
            .create_person(new_person("alice", "p1", "chef"))
            .await
            .unwrap();

        persons
            .create_person(new_person("Alice", "p1", "chef"))
            .await
            .unwrap();
        assert_matches!(
            persons.log_in(credentials("ALICE", "p1")).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_login() {
        let store = MemoryStore::new();
        let persons = service(&store);
        persons
            .create_person(new_person("alice", "p1", "chef"))
            .await
            .unwrap();

        assert_matches!(
            persons.log_in(credentials("alice", "p2")).await,
            Err(CoreError::InvalidCredential)
        );
        assert_matches!(
            persons.log_in(credentials("nobody", "p1")).await,
            Err(CoreError::NotFound { entity: "Person", .. })
        );
    }

    #[tokio::test]
    async fn empty_login_fails_validation() {
        let store = MemoryStore::new();
        let persons = service(&store);

        assert_matches!(
            persons.create_person(new_person("", "p1", "chef")).await,
            Err(CoreError::Validation(_))
        );
    }

    #[tokio::test]
    async fn argon2_scheme_does_not_store_plaintext() {
        let store = MemoryStore::new();
        let persons = PersonService::new(
            store.clone(),
            IdAllocator::default(),
            CredentialScheme::Argon2,
        );
        let id = persons
            .create_person(new_person("alice", "p1", "chef"))
            .await
            .unwrap();

        let stored = store.person(id).unwrap();
        assert_ne!(stored.password, "p1");
        assert_eq!(persons.log_in(credentials("alice", "p1")).await.unwrap().id, id);
        assert_matches!(
            persons.log_in(credentials("alice", "p2")).await,
            Err(CoreError::InvalidCredential)
        );
    }

    #[tokio::test]
    async fn change_position_returns_new_value() {
        let store = MemoryStore::new();
        let persons = service(&store);
        let id = persons
            .create_person(new_person("alice", "p1", "chef"))
            .await
            .unwrap();

        let position = persons
            .change_position(id, "head chef".into())
            .await
            .unwrap();

        assert_eq!(position, "head chef");
        assert_eq!(
            persons.log_in(credentials("alice", "p1")).await.unwrap().position,
            "head chef"
        );
        assert_matches!(
            persons.change_position(id + 1, "x".into()).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn person_ids_skip_existing_rows() {
        let store = MemoryStore::new();
        let persons = PersonService::new(
            store.clone(),
            IdAllocator::with_source(Arc::new(ScriptedIds::new([7, 7, 8])), 5),
            CredentialScheme::Plaintext,
        );

        let first = persons
            .create_person(new_person("alice", "p1", "chef"))
            .await
            .unwrap();
        let second = persons
            .create_person(new_person("bob", "p2", "waiter"))
            .await
            .unwrap();

        assert_eq!((first, second), (7, 8));
    }
}
