pub mod characters;
pub mod health;
pub mod stories;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /stories          run the pipeline (POST), list own stories (GET)
/// /stories/{id}     story with pages (GET)
/// /characters       saved character profiles (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/stories", stories::router())
        .nest("/characters", characters::router())
}
