//! Route definitions for the `/notes` resource.

use axum::routing::get;
use axum::Router;
use dishnote_core::note::Note;
use dishnote_core::store::Storage;

use crate::handlers::record;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// GET    /        -> list (?author=)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router<S: Storage>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/",
            get(record::list::<Note, S>).post(record::create::<Note, S>),
        )
        .route(
            "/{id}",
            get(record::get_by_id::<Note, S>)
                .patch(record::update::<Note, S>)
                .delete(record::delete::<Note, S>),
        )
}
