//! Route definitions for the `/dishes` resource.

use axum::routing::get;
use axum::Router;
use dishnote_core::dish::Dish;
use dishnote_core::store::Storage;

use crate::handlers::record;
use crate::state::AppState;

/// Routes mounted at `/dishes`.
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
            get(record::list::<Dish, S>).post(record::create::<Dish, S>),
        )
        .route(
            "/{id}",
            get(record::get_by_id::<Dish, S>)
                .patch(record::update::<Dish, S>)
                .delete(record::delete::<Dish, S>),
        )
}
