use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body returned by `GET /health`.
#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// Liveness probe. Always answers; reports `degraded` when the database
/// probe fails.
async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let db_healthy = fablehouse_db::health_check(&state.pool).await.is_ok();

    Json(HealthStatus {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Readiness probe. 200 once the database answers, 503 before.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match fablehouse_db::health_check(&state.pool).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Probe routes, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness))
}
