//! Generic record envelope and the record-kind descriptor.
//!
//! Notes and dishes share one lifecycle (allocate, validate author, insert,
//! merge, delete). [`RecordKind`] describes what differs between them: the
//! shape of the info block, the shape of a partial update, and how the two
//! combine.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A stored record: identifier, kind-specific info block and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<I> {
    pub id: DbId,
    pub info: I,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Descriptor for one kind of record.
pub trait RecordKind: Send + Sync + 'static {
    /// Human-readable entity name used in errors and logs.
    const ENTITY: &'static str;

    /// Full set of mutable fields, all required on create.
    type Info: Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Partial update: every field optional, `None` meaning "leave unchanged".
    type Patch: Debug + Default + DeserializeOwned + Send + Sync + 'static;

    /// Author reference carried by an info block.
    fn author(info: &Self::Info) -> DbId;

    /// Author reference carried by a patch, if the patch replaces it.
    fn patch_author(patch: &Self::Patch) -> Option<DbId>;

    /// Resolve every field of `patch` against `current`.
    ///
    /// Present values win, including empty strings; absent values keep what
    /// was stored.
    fn merge(current: Self::Info, patch: Self::Patch) -> Self::Info;
}
