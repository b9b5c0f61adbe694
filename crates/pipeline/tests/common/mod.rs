//! Shared mock collaborators for pipeline integration tests.
//!
//! `healthy_services` wires every seam to a well-behaved double: text
//! and traits come from canned strings, illustrations resolve to a
//! local asset server so the persister performs a real download, and
//! assets land in a [`MemoryStore`] the test can inspect.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use fablehouse_core::character::{CharacterTraits, NARRATION_VOICE};
use fablehouse_core::pages::split_pages;
use fablehouse_core::request::StoryRequest;
use fablehouse_core::types::DbId;
use fablehouse_db::models::account::CreateAccount;
use fablehouse_db::models::credit::CreateCredit;
use fablehouse_db::repositories::{AccountRepo, CreditRepo};
use fablehouse_genai::{
    CharacterExtractor, GenAiError, GeneratedStory, Illustrator, Narrator, TextGenerator,
};
use fablehouse_pipeline::Services;
use fablehouse_storage::{AssetPersister, MemoryStore};

/// Five paragraphs; the third carries [`FAIL_MARKER`] so one page's
/// illustration can be made to fail.
pub const SAMPLE_STORY: &str = "Mira found a tiny door behind the bookshelf.\n\n\
    She knocked twice and the door swung open onto a moonlit meadow.\n\n\
    A thunderstorm rolled in while the fireflies hid under the leaves.\n\n\
    Mira shared her raincoat with a very polite hedgehog.\n\n\
    When the sky cleared they counted seven new stars together.";

/// Substring unique to page three of [`SAMPLE_STORY`].
pub const FAIL_MARKER: &str = "thunderstorm";

/// Minimal PNG header, enough for a byte-level download.
const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

// ---------------------------------------------------------------------------
// Database seeding
// ---------------------------------------------------------------------------

pub async fn seed_account(pool: &PgPool, id: DbId) -> DbId {
    AccountRepo::create(pool, &CreateAccount::bare(id, format!("a{id}@example.com")))
        .await
        .unwrap()
        .id
}

pub async fn seed_admin(pool: &PgPool, id: DbId) -> DbId {
    let input = CreateAccount {
        id,
        email: format!("admin{id}@example.com"),
        is_admin: Some(true),
        unlimited_access: None,
    };
    AccountRepo::create(pool, &input).await.unwrap().id
}

pub async fn seed_credit(pool: &PgPool, account_id: DbId, remaining: i32) -> DbId {
    CreditRepo::create(
        pool,
        &CreateCredit {
            account_id,
            remaining,
            credit_type: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Asset server
// ---------------------------------------------------------------------------

/// Serve deterministic image bytes on an ephemeral port so the
/// persister's download path is exercised for real.
pub async fn spawn_asset_server() -> String {
    use axum::http::header::CONTENT_TYPE;
    use axum::routing::get;

    let app = axum::Router::new().route(
        "/img/{n}",
        get(|| async { ([(CONTENT_TYPE, "image/png")], PNG_BYTES.to_vec()) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

/// Returns a fixed narrative, paged the same way production does.
pub struct MockTextGenerator {
    text: String,
}

impl MockTextGenerator {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _request: &StoryRequest) -> Result<GeneratedStory, GenAiError> {
        Ok(GeneratedStory {
            full_text: self.text.clone(),
            pages: split_pages(&self.text),
        })
    }
}

/// Fails every generation attempt.
pub struct FailingTextGenerator;

#[async_trait]
impl TextGenerator for FailingTextGenerator {
    async fn generate(&self, _request: &StoryRequest) -> Result<GeneratedStory, GenAiError> {
        Err(GenAiError::Api {
            status: 500,
            body: "model unavailable".to_string(),
        })
    }
}

/// Hands out sequential URLs under the asset server; pages whose text
/// contains `fail_marker` error instead.
pub struct MockIllustrator {
    base_url: String,
    fail_marker: Option<String>,
    counter: AtomicUsize,
}

impl MockIllustrator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            fail_marker: None,
            counter: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(base_url: &str, marker: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            fail_marker: Some(marker.to_string()),
            counter: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Illustrator for MockIllustrator {
    async fn illustrate(&self, page_text: &str) -> Result<String, GenAiError> {
        if let Some(marker) = &self.fail_marker {
            if page_text.contains(marker.as_str()) {
                return Err(GenAiError::Timeout("prediction never settled".to_string()));
            }
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}/img/{n}", self.base_url))
    }
}

/// Fails every illustration attempt.
pub struct FailingIllustrator;

#[async_trait]
impl Illustrator for FailingIllustrator {
    async fn illustrate(&self, _page_text: &str) -> Result<String, GenAiError> {
        Err(GenAiError::Api {
            status: 502,
            body: "render farm offline".to_string(),
        })
    }
}

/// Returns canned audio bytes, or errors when built with `failing`.
pub struct MockNarrator {
    audio: Option<Vec<u8>>,
}

impl MockNarrator {
    pub fn with_audio() -> Self {
        Self {
            audio: Some(vec![0x49, 0x44, 0x33, 0x04]),
        }
    }

    pub fn failing() -> Self {
        Self { audio: None }
    }
}

#[async_trait]
impl Narrator for MockNarrator {
    fn voice_id(&self) -> &str {
        NARRATION_VOICE
    }

    async fn narrate(&self, _text: &str) -> Result<Vec<u8>, GenAiError> {
        match &self.audio {
            Some(audio) => Ok(audio.clone()),
            None => Err(GenAiError::Api {
                status: 429,
                body: "voice quota exhausted".to_string(),
            }),
        }
    }
}

/// Returns fixed traits derived from the request.
pub struct MockExtractor;

#[async_trait]
impl CharacterExtractor for MockExtractor {
    async fn extract(
        &self,
        _story_text: &str,
        request: &StoryRequest,
    ) -> Result<CharacterTraits, GenAiError> {
        Ok(CharacterTraits {
            appearance: "curly hair and red boots".to_string(),
            personality: request.interests.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Service bundles
// ---------------------------------------------------------------------------

/// All collaborators healthy. Returns the store for asset assertions
/// and the asset server's base URL so tests can swap in illustrators
/// that fail selectively.
pub async fn healthy_services() -> (Services, Arc<MemoryStore>, String) {
    let base_url = spawn_asset_server().await;
    let store = Arc::new(MemoryStore::new());
    let services = Services {
        text: Arc::new(MockTextGenerator::new(SAMPLE_STORY)),
        illustrator: Arc::new(MockIllustrator::new(&base_url)),
        narrator: Arc::new(MockNarrator::with_audio()),
        characters: Arc::new(MockExtractor),
        persister: Arc::new(AssetPersister::new(store.clone())),
        mailer: None,
    };
    (services, store, base_url)
}
