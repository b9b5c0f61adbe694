//! Shared helpers for API integration tests.
//!
//! Builds the full application router over mock generation services so
//! HTTP tests exercise the same middleware stack production uses, plus
//! request/response helpers and database seeding.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fablehouse_api::auth::jwt::{generate_access_token, JwtConfig};
use fablehouse_api::config::ServerConfig;
use fablehouse_api::router::build_app_router;
use fablehouse_api::state::AppState;
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

/// Signing secret shared by the router config and [`auth_token`].
const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789";

/// Five paragraphs, so a healthy run produces five pages.
const STORY_TEXT: &str = "Mira found a tiny door behind the bookshelf.\n\n\
    She knocked twice and the door swung open onto a moonlit meadow.\n\n\
    A gentle rain began while the fireflies hid under the leaves.\n\n\
    Mira shared her raincoat with a very polite hedgehog.\n\n\
    When the sky cleared they counted seven new stars together.";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with a fixed JWT secret and safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over healthy mock services.
pub async fn build_test_app(pool: PgPool) -> Router {
    let (services, _store) = mock_services().await;
    build_test_app_with(pool, services)
}

/// Build the full application router over the given services.
pub fn build_test_app_with(pool: PgPool, services: Services) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        services: Arc::new(services),
    };
    build_app_router(state, &config)
}

/// Mint a Bearer token the test router accepts.
pub fn auth_token(account_id: DbId, email: &str) -> String {
    let config = test_config();
    generate_access_token(account_id, Some(email), &config.jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Deserialize a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Database seeding
// ---------------------------------------------------------------------------

pub async fn seed_admin(pool: &PgPool, id: DbId) -> DbId {
    let input = CreateAccount {
        id,
        email: format!("admin{id}@example.com"),
        is_admin: Some(true),
        unlimited_access: None,
    };
    AccountRepo::create(pool, &input).await.unwrap().id
}

pub async fn seed_account(pool: &PgPool, id: DbId) -> DbId {
    AccountRepo::create(pool, &CreateAccount::bare(id, format!("a{id}@example.com")))
        .await
        .unwrap()
        .id
}

pub async fn seed_credit(pool: &PgPool, account_id: DbId, remaining: i32) {
    CreditRepo::create(
        pool,
        &CreateCredit {
            account_id,
            remaining,
            credit_type: None,
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Mock services
// ---------------------------------------------------------------------------

/// All collaborators healthy; assets land in the returned store.
pub async fn mock_services() -> (Services, Arc<MemoryStore>) {
    let base_url = spawn_asset_server().await;
    let store = Arc::new(MemoryStore::new());
    let services = Services {
        text: Arc::new(MockTextGenerator),
        illustrator: Arc::new(MockIllustrator {
            base_url,
            counter: AtomicUsize::new(0),
        }),
        narrator: Arc::new(MockNarrator),
        characters: Arc::new(MockExtractor),
        persister: Arc::new(AssetPersister::new(store.clone())),
        mailer: None,
    };
    (services, store)
}

/// Serve deterministic image bytes on an ephemeral port.
async fn spawn_asset_server() -> String {
    use axum::http::header::CONTENT_TYPE;
    use axum::routing::get;

    let app = axum::Router::new().route(
        "/img/{n}",
        get(|| async {
            (
                [(CONTENT_TYPE, "image/png")],
                vec![0x89u8, 0x50, 0x4E, 0x47],
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub struct MockTextGenerator;

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _request: &StoryRequest) -> Result<GeneratedStory, GenAiError> {
        Ok(GeneratedStory {
            full_text: STORY_TEXT.to_string(),
            pages: split_pages(STORY_TEXT),
        })
    }
}

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

pub struct MockIllustrator {
    base_url: String,
    counter: AtomicUsize,
}

#[async_trait]
impl Illustrator for MockIllustrator {
    async fn illustrate(&self, _page_text: &str) -> Result<String, GenAiError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}/img/{n}", self.base_url))
    }
}

pub struct MockNarrator;

#[async_trait]
impl Narrator for MockNarrator {
    fn voice_id(&self) -> &str {
        NARRATION_VOICE
    }

    async fn narrate(&self, _text: &str) -> Result<Vec<u8>, GenAiError> {
        Ok(vec![0x49, 0x44, 0x33, 0x04])
    }
}

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
