//! Collision-checked identifier allocation.
//!
//! Identifiers are random rather than sequential. A candidate is accepted only
//! after storage confirms no row carries it. The check and the later insert are
//! not atomic; a concurrent writer can still claim the same candidate, in which
//! case the insert fails on the primary key and surfaces as a conflict.

use std::future::Future;
use std::sync::Arc;

use rand::Rng;

use crate::error::CoreError;
use crate::store::StorageError;
use crate::types::DbId;

/// Upper bound (inclusive) for random candidates. Keeps identifiers exact in
/// JSON clients that store numbers as doubles.
pub const MAX_CANDIDATE_ID: DbId = u32::MAX as DbId;

/// Default number of candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Produces identifier candidates.
pub trait IdSource: Send + Sync {
    fn candidate(&self) -> DbId;
}

/// Uniform random candidates in `1..=MAX_CANDIDATE_ID`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn candidate(&self) -> DbId {
        rand::rng().random_range(1..=MAX_CANDIDATE_ID)
    }
}

/// Draws candidates until storage reports one as free.
#[derive(Clone)]
pub struct IdAllocator {
    source: Arc<dyn IdSource>,
    max_attempts: u32,
}

impl IdAllocator {
    /// Random allocator trying at most `max_attempts` candidates (minimum 1).
    pub fn new(max_attempts: u32) -> Self {
        Self::with_source(Arc::new(RandomIds), max_attempts)
    }

    pub fn with_source(source: Arc<dyn IdSource>, max_attempts: u32) -> Self {
        Self {
            source,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Return the first candidate for which `exists` reports `false`.
    ///
    /// A storage error from `exists` aborts immediately and is never retried.
    /// Running out of attempts fails with `StorageUnavailable`.
    pub async fn allocate<F, Fut>(
        &self,
        entity: &'static str,
        mut exists: F,
    ) -> Result<DbId, CoreError>
    where
        F: FnMut(DbId) -> Fut,
        Fut: Future<Output = Result<bool, StorageError>>,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = self.source.candidate();
            if !exists(candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!(entity, candidate, attempt, "Identifier collision, drawing again");
        }

        tracing::warn!(
            entity,
            attempts = self.max_attempts,
            "Identifier allocation exhausted"
        );
        Err(CoreError::StorageUnavailable(format!(
            "no free {entity} identifier after {} attempts",
            self.max_attempts
        )))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl std::fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdAllocator")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
