pub mod dish;
pub mod health;
pub mod note;
pub mod person;

use axum::Router;
use dishnote_core::store::Storage;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notes                        list (?author=), create
/// /notes/{id}                   get, patch, delete
///
/// /dishes                       list (?author=), create
/// /dishes/{id}                  get, patch, delete
///
/// /persons                      create
/// /persons/login                log in
/// /persons/{id}/position        change position (PATCH)
/// ```
pub fn api_routes<S: Storage>() -> Router<AppState<S>> {
    Router::new()
        .nest("/notes", note::router())
        .nest("/dishes", dish::router())
        .nest("/persons", person::router())
}
