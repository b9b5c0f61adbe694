//! Handlers for the `/characters` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use fablehouse_db::repositories::CharacterProfileRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthAccount;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/characters
///
/// List the caller's saved character profiles, newest first.
pub async fn list(
    State(state): State<AppState>,
    account: AuthAccount,
) -> AppResult<impl IntoResponse> {
    let profiles = CharacterProfileRepo::list_for_account(&state.pool, account.account_id).await?;
    Ok(Json(DataResponse { data: profiles }))
}
