//! Route definitions for stories.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::stories;
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// POST   /        -> create (runs the pipeline)
/// GET    /        -> list
/// GET    /{id}    -> get_by_id (story + pages)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(stories::create).get(stories::list))
        .route("/{id}", get(stories::get_by_id))
}
