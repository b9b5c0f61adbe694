//! Drives one story request from access check to completion.
//!
//! The run is fatal only at its spine: access denial, text generation,
//! the story insert, the page inserts and the terminal status write.
//! Illustration, narration, the character profile and the completion
//! email degrade instead, each miss recorded as a [`StageDiagnostic`]
//! on the outcome.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use sqlx::PgPool;

use fablehouse_core::access::AccessDecision;
use fablehouse_core::request::StoryRequest;
use fablehouse_core::story::StoryStatus;
use fablehouse_core::types::DbId;
use fablehouse_db::models::character_profile::CreateCharacterProfile;
use fablehouse_db::models::story::{CreateStory, Story, UpdateStory};
use fablehouse_db::models::story_page::CreateStoryPage;
use fablehouse_db::repositories::{CharacterProfileRepo, StoryPageRepo, StoryRepo};
use fablehouse_genai::GeneratedStory;

use crate::access::check_access;
use crate::error::PipelineError;
use crate::services::Services;

/// Wall-clock budget for the completion email.
const EMAIL_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A best-effort stage that failed without failing the run.
#[derive(Debug, Clone)]
pub struct StageDiagnostic {
    /// Stable stage name (`illustration`, `narration`, ...).
    pub stage: &'static str,
    /// Human-readable failure detail.
    pub detail: String,
}

impl StageDiagnostic {
    fn push(diagnostics: &mut Vec<StageDiagnostic>, stage: &'static str, detail: String) {
        tracing::warn!(stage, %detail, "Best-effort stage failed");
        diagnostics.push(Self { stage, detail });
    }
}

/// What one successful run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub story_id: DbId,
    pub page_count: usize,
    pub narration_url: Option<String>,
    /// Empty when every stage succeeded.
    pub diagnostics: Vec<StageDiagnostic>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full story pipeline for one request.
///
/// The caller has already validated `request`. A `Denied` error means
/// the account gate refused the run before any side effect on story
/// data; any other error is a fault at the fatal spine.
pub async fn run_story(
    pool: &PgPool,
    services: &Services,
    account_id: DbId,
    email: &str,
    request: &StoryRequest,
) -> Result<PipelineOutcome, PipelineError> {
    // Missing upstream credentials fail here, before a credit is spent.
    services.ensure_configured()?;

    match check_access(pool, account_id, email).await? {
        AccessDecision::Allowed { consumed_credit } => {
            tracing::info!(account_id, ?consumed_credit, "Access granted");
        }
        AccessDecision::Denied { reason } => {
            tracing::info!(account_id, reason, "Access denied");
            return Err(PipelineError::Denied { reason });
        }
    }

    // No Story row exists yet, so a text failure leaves nothing behind.
    let generated = services
        .text
        .generate(request)
        .await
        .map_err(PipelineError::TextGeneration)?;

    let story = StoryRepo::create(
        pool,
        &CreateStory {
            account_id,
            child_name: request.child_name.clone(),
            age: request.age,
            interests: request.interests.clone(),
            story_text: generated.full_text.clone(),
        },
    )
    .await?;
    tracing::info!(
        story_id = story.id,
        pages = generated.pages.len(),
        "Story text persisted"
    );

    let mut diagnostics = Vec::new();

    let upstream_urls = illustrate_pages(services, &generated.pages, &mut diagnostics).await;
    let stored_urls = persist_images(services, story.id, upstream_urls, &mut diagnostics).await;

    // Every page row is written even when its illustration failed; a
    // page INSERT failure is the one fault that marks the story failed.
    for (index, body) in generated.pages.iter().enumerate() {
        let input = CreateStoryPage {
            story_id: story.id,
            page_number: index as i32 + 1,
            body: body.clone(),
            image_url: stored_urls[index].clone(),
        };
        if let Err(err) = StoryPageRepo::create(pool, &input).await {
            mark_failed(pool, story.id).await;
            return Err(PipelineError::Persistence(err));
        }
    }

    let narration_url = narrate_story(services, story.id, &generated.full_text, &mut diagnostics).await;

    // The terminal-success write. Entered unconditionally once all pages
    // exist and narration has settled, null sub-artifacts included.
    StoryRepo::update(pool, story.id, &UpdateStory::completed(narration_url.clone()))
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tracing::info!(story_id = story.id, "Story completed");

    save_character_profile(
        pool,
        services,
        &story,
        &generated,
        &stored_urls,
        request,
        &mut diagnostics,
    )
    .await;

    if let Some(mailer) = &services.mailer {
        if !email.trim().is_empty() {
            let send = mailer.send_story_ready(email, &request.child_name, story.id);
            match tokio::time::timeout(EMAIL_TIMEOUT, send).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    StageDiagnostic::push(&mut diagnostics, "completion_email", err.to_string());
                }
                Err(_) => StageDiagnostic::push(
                    &mut diagnostics,
                    "completion_email",
                    format!("timed out after {}s", EMAIL_TIMEOUT.as_secs()),
                ),
            }
        }
    }

    Ok(PipelineOutcome {
        story_id: story.id,
        page_count: generated.pages.len(),
        narration_url,
        diagnostics,
    })
}

// ---------------------------------------------------------------------------
// Stage helpers
// ---------------------------------------------------------------------------

/// Fan out one illustration task per page and fan in results in page
/// order. A failed page yields `None` plus a diagnostic.
async fn illustrate_pages(
    services: &Services,
    pages: &[String],
    diagnostics: &mut Vec<StageDiagnostic>,
) -> Vec<Option<String>> {
    let handles: Vec<_> = pages
        .iter()
        .map(|body| {
            let illustrator = Arc::clone(&services.illustrator);
            let body = body.clone();
            tokio::spawn(async move { illustrator.illustrate(&body).await })
        })
        .collect();

    let mut urls = Vec::with_capacity(pages.len());
    for (index, joined) in join_all(handles).await.into_iter().enumerate() {
        let page_number = index + 1;
        match joined {
            Ok(Ok(url)) => urls.push(Some(url)),
            Ok(Err(err)) => {
                StageDiagnostic::push(
                    diagnostics,
                    "illustration",
                    format!("page {page_number}: {err}"),
                );
                urls.push(None);
            }
            Err(err) => {
                StageDiagnostic::push(
                    diagnostics,
                    "illustration",
                    format!("page {page_number}: task failed: {err}"),
                );
                urls.push(None);
            }
        }
    }
    urls
}

/// Download each generated illustration and store it, in parallel. A
/// failed transfer yields `None` plus a diagnostic; pages that never
/// got an illustration pass through as `None` untouched.
async fn persist_images(
    services: &Services,
    story_id: DbId,
    upstream: Vec<Option<String>>,
    diagnostics: &mut Vec<StageDiagnostic>,
) -> Vec<Option<String>> {
    let page_count = upstream.len();
    let handles: Vec<_> = upstream
        .into_iter()
        .enumerate()
        .map(|(index, maybe_url)| {
            let persister = Arc::clone(&services.persister);
            let page_number = index as i32 + 1;
            tokio::spawn(async move {
                match maybe_url {
                    Some(url) => persister
                        .persist_image_from_url(story_id, page_number, &url)
                        .await
                        .map(Some),
                    None => Ok(None),
                }
            })
        })
        .collect();

    let mut stored = Vec::with_capacity(page_count);
    for (index, joined) in join_all(handles).await.into_iter().enumerate() {
        let page_number = index + 1;
        match joined {
            Ok(Ok(url)) => stored.push(url),
            Ok(Err(err)) => {
                StageDiagnostic::push(
                    diagnostics,
                    "image_persistence",
                    format!("page {page_number}: {err}"),
                );
                stored.push(None);
            }
            Err(err) => {
                StageDiagnostic::push(
                    diagnostics,
                    "image_persistence",
                    format!("page {page_number}: task failed: {err}"),
                );
                stored.push(None);
            }
        }
    }
    stored
}

/// Narrate the full story and store the audio. Either failure leaves
/// the story without narration.
async fn narrate_story(
    services: &Services,
    story_id: DbId,
    full_text: &str,
    diagnostics: &mut Vec<StageDiagnostic>,
) -> Option<String> {
    let audio = match services.narrator.narrate(full_text).await {
        Ok(audio) => audio,
        Err(err) => {
            StageDiagnostic::push(diagnostics, "narration", err.to_string());
            return None;
        }
    };
    match services.persister.persist_narration(story_id, audio).await {
        Ok(url) => Some(url),
        Err(err) => {
            StageDiagnostic::push(diagnostics, "narration_persistence", err.to_string());
            None
        }
    }
}

/// Extract and save the main character's profile. Failures never touch
/// the completed story.
async fn save_character_profile(
    pool: &PgPool,
    services: &Services,
    story: &Story,
    generated: &GeneratedStory,
    stored_urls: &[Option<String>],
    request: &StoryRequest,
    diagnostics: &mut Vec<StageDiagnostic>,
) {
    let traits = match services
        .characters
        .extract(&generated.full_text, request)
        .await
    {
        Ok(traits) => traits,
        Err(err) => {
            StageDiagnostic::push(diagnostics, "character_profile", err.to_string());
            return;
        }
    };
    let input = CreateCharacterProfile {
        account_id: story.account_id,
        story_id: story.id,
        name: request.child_name.clone(),
        age: request.age,
        appearance: traits.appearance,
        personality: traits.personality,
        image_url: stored_urls.first().cloned().flatten(),
        voice_id: services.narrator.voice_id().to_string(),
    };
    if let Err(err) = CharacterProfileRepo::create(pool, &input).await {
        StageDiagnostic::push(diagnostics, "character_profile", err.to_string());
    }
}

/// Best-effort transition to `failed`; the original fault wins.
async fn mark_failed(pool: &PgPool, story_id: DbId) {
    let update = UpdateStory::status(StoryStatus::Failed);
    if let Err(err) = StoryRepo::update(pool, story_id, &update).await {
        tracing::error!(story_id, error = %err, "Could not mark story failed");
    }
}
