//! Route definitions for the `/persons` resource.

use axum::routing::{patch, post};
use axum::Router;
use dishnote_core::store::Storage;

use crate::handlers::person;
use crate::state::AppState;

/// Routes mounted at `/persons`.
///
/// ```text
/// POST   /                -> create
/// POST   /login           -> log_in
/// PATCH  /{id}/position   -> change_position
/// ```
pub fn router<S: Storage>() -> Router<AppState<S>> {
    Router::new()
        .route("/", post(person::create::<S>))
        .route("/login", post(person::log_in::<S>))
        .route("/{id}/position", patch(person::change_position::<S>))
}
