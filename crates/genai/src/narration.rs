//! Text-to-speech client for story narration.
//!
//! Talks to an ElevenLabs-style `/v1/text-to-speech/{voice_id}`
//! endpoint and returns the audio bytes (MP3). One call per story,
//! after the page set is known.

use std::time::Duration;

use async_trait::async_trait;

use fablehouse_core::character::NARRATION_VOICE;

use crate::error::GenAiError;
use crate::http::ensure_success;
use crate::traits::Narrator;

/// Per-request timeout. Narrating a full story is the slowest single
/// call in the pipeline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Synthesis model passed with every request.
const TTS_MODEL_ID: &str = "eleven_multilingual_v2";

/// Configuration for the narration client.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// API key. Requests fail with a configuration error when missing.
    pub api_key: Option<String>,
    /// Service base URL (default: `https://api.elevenlabs.io`).
    pub base_url: String,
    /// Voice used for narration (default: `Rachel`).
    pub voice_id: String,
}

impl ElevenLabsConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `ELEVENLABS_API_KEY`  | unset (requests fail)       |
    /// | `ELEVENLABS_BASE_URL` | `https://api.elevenlabs.io` |
    /// | `ELEVENLABS_VOICE_ID` | `Rachel`                    |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("ELEVENLABS_API_KEY").ok(),
            base_url: std::env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| "https://api.elevenlabs.io".into()),
            voice_id: std::env::var("ELEVENLABS_VOICE_ID")
                .unwrap_or_else(|_| NARRATION_VOICE.into()),
        }
    }
}

/// HTTP client for an ElevenLabs-style text-to-speech service.
pub struct ElevenLabsClient {
    client: reqwest::Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    /// Create a client with the per-request timeout applied.
    pub fn new(config: ElevenLabsConfig) -> Self {
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
            .ok_or_else(|| GenAiError::Config("ELEVENLABS_API_KEY is not configured".into()))
    }
}

#[async_trait]
impl Narrator for ElevenLabsClient {
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        self.api_key().map(|_| ())
    }

    fn voice_id(&self) -> &str {
        &self.config.voice_id
    }

    async fn narrate(&self, text: &str) -> Result<Vec<u8>, GenAiError> {
        let api_key = self.api_key()?;
        let body = serde_json::json!({
            "text": text,
            "model_id": TTS_MODEL_ID,
        });

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.config.base_url, self.config.voice_id
            ))
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let audio = ensure_success(response).await?.bytes().await?;
        if audio.is_empty() {
            return Err(GenAiError::InvalidResponse(
                "narration response was empty".into(),
            ));
        }

        tracing::debug!(bytes = audio.len(), "Narration audio received");
        Ok(audio.to_vec())
    }
}
