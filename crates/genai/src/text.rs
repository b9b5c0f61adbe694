//! Chat-completion client for story text and character extraction.
//!
//! Talks to any OpenAI-compatible `/v1/chat/completions` endpoint. The
//! same client serves both the story narrative (long, creative) and the
//! character extraction call (short, structured JSON output).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use fablehouse_core::character::CharacterTraits;
use fablehouse_core::pages::split_pages;
use fablehouse_core::prompt::{
    character_prompt, story_prompt, CHARACTER_SYSTEM_PROMPT, STORY_SYSTEM_PROMPT,
};
use fablehouse_core::request::StoryRequest;

use crate::error::GenAiError;
use crate::http::ensure_success;
use crate::traits::{CharacterExtractor, GeneratedStory, TextGenerator};

/// Per-request timeout for completion calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Sampling temperature and token budget for the story narrative.
const STORY_TEMPERATURE: f32 = 0.9;
const STORY_MAX_TOKENS: u32 = 2000;

/// Sampling temperature and token budget for character extraction.
const CHARACTER_TEMPERATURE: f32 = 0.7;
const CHARACTER_MAX_TOKENS: u32 = 300;

/// Configuration for the chat-completion client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key. Requests fail with a configuration error when missing.
    pub api_key: Option<String>,
    /// Service base URL (default: `https://api.openai.com`).
    pub base_url: String,
    /// Model name (default: `gpt-4o`).
    pub model: String,
}

impl OpenAiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default                  |
    /// |-------------------|--------------------------|
    /// | `OPENAI_API_KEY`  | unset (requests fail)    |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com` |
    /// | `OPENAI_MODEL`    | `gpt-4o`                 |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any was returned.
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for an OpenAI-compatible completion service.
pub struct OpenAiClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a client with the per-request timeout applied.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn api_key(&self) -> Result<&str, GenAiError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| GenAiError::Config("OPENAI_API_KEY is not configured".into()))
    }

    /// Run one chat completion and return the first choice's content.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
        response_format: Option<ResponseFormat>,
    ) -> Result<String, GenAiError> {
        let api_key = self.api_key()?;
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            max_tokens,
            response_format,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatResponse = ensure_success(response).await?.json().await?;
        parsed
            .first_content()
            .ok_or_else(|| GenAiError::InvalidResponse("completion returned no content".into()))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        self.api_key().map(|_| ())
    }

    async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, GenAiError> {
        let content = self
            .complete(
                STORY_SYSTEM_PROMPT,
                &story_prompt(request),
                STORY_TEMPERATURE,
                STORY_MAX_TOKENS,
                None,
            )
            .await?;

        let pages = split_pages(&content);
        if pages.is_empty() {
            return Err(GenAiError::InvalidResponse(
                "story text contained no pages".into(),
            ));
        }

        tracing::debug!(pages = pages.len(), "Story text generated");
        Ok(GeneratedStory {
            full_text: content,
            pages,
        })
    }
}

#[async_trait]
impl CharacterExtractor for OpenAiClient {
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        self.api_key().map(|_| ())
    }

    async fn extract(
        &self,
        story_text: &str,
        request: &StoryRequest,
    ) -> Result<CharacterTraits, GenAiError> {
        let content = self
            .complete(
                CHARACTER_SYSTEM_PROMPT,
                &character_prompt(story_text, request),
                CHARACTER_TEMPERATURE,
                CHARACTER_MAX_TOKENS,
                Some(ResponseFormat::json_object()),
            )
            .await?;

        Ok(traits_from_content(&content, request))
    }
}

/// Raw extraction payload; either field may be absent.
#[derive(Debug, Deserialize)]
struct RawTraits {
    appearance: Option<String>,
    personality: Option<String>,
}

/// Parse the extraction output, substituting deterministic fallbacks
/// for anything missing or unparseable. Unusable model output is not
/// an error; only transport failures are.
fn traits_from_content(content: &str, request: &StoryRequest) -> CharacterTraits {
    let fallback = CharacterTraits::fallback(request);
    match serde_json::from_str::<RawTraits>(content) {
        Ok(raw) => CharacterTraits {
            appearance: raw.appearance.unwrap_or(fallback.appearance),
            personality: raw.personality.unwrap_or(fallback.personality),
        },
        Err(err) => {
            tracing::warn!(%err, "Character extraction returned unparseable JSON");
            fallback
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
