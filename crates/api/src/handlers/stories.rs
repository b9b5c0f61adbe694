//! Handlers for the `/stories` resource.
//!
//! Creation runs the whole pipeline inside the request and answers
//! only once the story has settled; reads serve the viewer.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use fablehouse_core::error::CoreError;
use fablehouse_core::request::StoryRequest;
use fablehouse_core::types::DbId;
use fablehouse_db::models::story::Story;
use fablehouse_db::models::story_page::StoryPage;
use fablehouse_db::repositories::{StoryPageRepo, StoryRepo};
use fablehouse_pipeline::run_story;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAccount;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a finished story run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRunBody {
    pub story_id: DbId,
    pub page_count: usize,
    pub narration_url: Option<String>,
    /// Best-effort stages that failed during the run.
    pub diagnostics: Vec<DiagnosticBody>,
}

/// One degraded stage of a run.
#[derive(Debug, Serialize)]
pub struct DiagnosticBody {
    pub stage: &'static str,
    pub detail: String,
}

/// A story with its pages in reading order.
#[derive(Debug, Serialize)]
pub struct StoryWithPages {
    pub story: Story,
    pub pages: Vec<StoryPage>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/stories
///
/// Validate the request, then run the full pipeline synchronously.
/// Degraded sub-artifacts still answer 200; only gate denials and
/// spine faults become error responses.
pub async fn create(
    State(state): State<AppState>,
    account: AuthAccount,
    Json(request): Json<StoryRequest>,
) -> AppResult<impl IntoResponse> {
    request.validate()?;

    let outcome = run_story(
        &state.pool,
        &state.services,
        account.account_id,
        &account.email,
        &request,
    )
    .await?;

    let body = StoryRunBody {
        story_id: outcome.story_id,
        page_count: outcome.page_count,
        narration_url: outcome.narration_url,
        diagnostics: outcome
            .diagnostics
            .into_iter()
            .map(|d| DiagnosticBody {
                stage: d.stage,
                detail: d.detail,
            })
            .collect(),
    };
    Ok(Json(DataResponse { data: body }))
}

/// GET /api/v1/stories
///
/// List the caller's stories, newest first.
pub async fn list(
    State(state): State<AppState>,
    account: AuthAccount,
) -> AppResult<impl IntoResponse> {
    let stories = StoryRepo::list_for_account(&state.pool, account.account_id).await?;
    Ok(Json(DataResponse { data: stories }))
}

/// GET /api/v1/stories/{id}
///
/// Fetch one of the caller's stories with its pages. A story owned by
/// another account answers 404, same as a missing one.
pub async fn get_by_id(
    State(state): State<AppState>,
    account: AuthAccount,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_owned(&state.pool, id, account.account_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }))?;
    let pages = StoryPageRepo::list_for_story(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: StoryWithPages { story, pages },
    }))
}
