//! Prediction client for page illustrations.
//!
//! Talks to a Replicate-style prediction API: create a prediction for
//! the configured image model, then poll until it reaches a terminal
//! state. The whole round-trip runs under one overall deadline so a
//! stuck prediction can never hang the page fan-out.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;

use fablehouse_core::prompt::image_prompt;

use crate::error::GenAiError;
use crate::http::ensure_success;
use crate::traits::Illustrator;

/// Per-request timeout for create and poll calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay between poll attempts.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Overall deadline for one prediction, creation included.
const PREDICTION_DEADLINE: Duration = Duration::from_secs(120);

/// Aspect ratio for storybook illustrations.
const ASPECT_RATIO: &str = "16:9";

/// Configuration for the prediction client.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// API token. Requests fail with a configuration error when missing.
    pub api_token: Option<String>,
    /// Service base URL (default: `https://api.replicate.com`).
    pub base_url: String,
    /// Image model in `owner/name` form
    /// (default: `black-forest-labs/flux-schnell`).
    pub model: String,
}

impl ReplicateConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                           |
    /// |-----------------------|-----------------------------------|
    /// | `REPLICATE_API_TOKEN` | unset (requests fail)             |
    /// | `REPLICATE_BASE_URL`  | `https://api.replicate.com`       |
    /// | `REPLICATE_MODEL`     | `black-forest-labs/flux-schnell`  |
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var("REPLICATE_API_TOKEN").ok(),
            base_url: std::env::var("REPLICATE_BASE_URL")
                .unwrap_or_else(|_| "https://api.replicate.com".into()),
            model: std::env::var("REPLICATE_MODEL")
                .unwrap_or_else(|_| "black-forest-labs/flux-schnell".into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A prediction resource as returned by create and poll calls.
#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: String,
    output: Option<Vec<String>>,
    error: Option<String>,
}

impl Prediction {
    fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "succeeded" | "failed" | "canceled")
    }

    /// First output URL of a succeeded prediction.
    fn into_output_url(self) -> Result<String, GenAiError> {
        if self.status != "succeeded" {
            return Err(GenAiError::InvalidResponse(format!(
                "prediction {}: {}",
                self.status,
                self.error.unwrap_or_else(|| "no error detail".into()),
            )));
        }
        self.output
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| GenAiError::InvalidResponse("prediction succeeded without output".into()))
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for a Replicate-style prediction service.
pub struct ReplicateClient {
    client: reqwest::Client,
    config: ReplicateConfig,
}

impl ReplicateClient {
    /// Create a client with the per-request timeout applied.
    pub fn new(config: ReplicateConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn api_token(&self) -> Result<&str, GenAiError> {
        self.config
            .api_token
            .as_deref()
            .ok_or_else(|| GenAiError::Config("REPLICATE_API_TOKEN is not configured".into()))
    }

    /// Create a prediction for the configured model.
    async fn create_prediction(&self, prompt: &str) -> Result<Prediction, GenAiError> {
        let token = self.api_token()?;
        let body = serde_json::json!({
            "input": {
                "prompt": prompt,
                "num_outputs": 1,
                "aspect_ratio": ASPECT_RATIO,
            },
        });

        let response = self
            .client
            .post(format!(
                "{}/v1/models/{}/predictions",
                self.config.base_url, self.config.model
            ))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    /// Fetch the current state of a prediction.
    async fn get_prediction(&self, id: &str) -> Result<Prediction, GenAiError> {
        let token = self.api_token()?;
        let response = self
            .client
            .get(format!("{}/v1/predictions/{}", self.config.base_url, id))
            .bearer_auth(token)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }
}

#[async_trait]
impl Illustrator for ReplicateClient {
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        self.api_token().map(|_| ())
    }

    async fn illustrate(&self, page_text: &str) -> Result<String, GenAiError> {
        let prompt = image_prompt(page_text);
        let started = Instant::now();

        let mut prediction = self.create_prediction(&prompt).await?;
        while !prediction.is_terminal() {
            if started.elapsed() >= PREDICTION_DEADLINE {
                return Err(GenAiError::Timeout(format!(
                    "prediction {} did not finish within {}s",
                    prediction.id,
                    PREDICTION_DEADLINE.as_secs(),
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
            prediction = self.get_prediction(&prediction.id).await?;
        }

        prediction.into_output_url()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
