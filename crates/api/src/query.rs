//! Shared query parameter types for API handlers.

use dishnote_core::types::DbId;
use serde::Deserialize;

/// Optional `?author=` filter for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AuthorFilter {
    pub author: Option<DbId>,
}
