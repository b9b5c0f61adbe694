//! Bearer-token extractor for authenticated routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use fablehouse_core::error::CoreError;
use fablehouse_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The account behind a request, taken from a `Bearer` JWT in the
/// `Authorization` header.
///
/// Handlers opt in to authentication by adding it as a parameter:
///
/// ```ignore
/// async fn handler(account: AuthAccount) -> AppResult<Json<()>> {
///     tracing::info!(account_id = account.account_id, "request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// Database id from `claims.sub`.
    pub account_id: DbId,
    /// Email from the token; empty when the provider omitted the claim.
    pub email: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthAccount {
            account_id: claims.sub,
            email: claims.email.unwrap_or_default(),
        })
    }
}
