//! The pipeline's external collaborators, bundled for injection.

use std::sync::Arc;

use fablehouse_genai::{
    CharacterExtractor, ElevenLabsClient, ElevenLabsConfig, GenAiError, Illustrator, Narrator,
    OpenAiClient, OpenAiConfig, ReplicateClient, ReplicateConfig, TextGenerator,
};
use fablehouse_storage::{AssetPersister, S3Config, S3Store, StorageError};

use crate::email::{EmailConfig, StoryMailer};
use crate::error::PipelineError;

/// Everything the orchestrator calls out to.
///
/// The process builds one instance at startup; tests swap in mocks per
/// field.
#[derive(Clone)]
pub struct Services {
    pub text: Arc<dyn TextGenerator>,
    pub illustrator: Arc<dyn Illustrator>,
    pub narrator: Arc<dyn Narrator>,
    pub characters: Arc<dyn CharacterExtractor>,
    pub persister: Arc<AssetPersister>,
    /// `None` when SMTP is not configured; the email stage is skipped.
    pub mailer: Option<Arc<StoryMailer>>,
}

impl Services {
    /// Build the production collaborators from environment variables.
    ///
    /// Missing credentials do not fail here; they surface through
    /// [`Services::ensure_configured`] when a run is attempted.
    pub async fn from_env() -> Self {
        let openai = Arc::new(OpenAiClient::new(OpenAiConfig::from_env()));
        let store = S3Store::connect(S3Config::from_env()).await;
        Self {
            text: openai.clone(),
            illustrator: Arc::new(ReplicateClient::new(ReplicateConfig::from_env())),
            narrator: Arc::new(ElevenLabsClient::new(ElevenLabsConfig::from_env())),
            characters: openai,
            persister: Arc::new(AssetPersister::new(Arc::new(store))),
            mailer: EmailConfig::from_env().map(|config| Arc::new(StoryMailer::new(config))),
        }
    }

    /// Reject a run before the access gate when any required credential
    /// is missing, so no credit is ever spent on an unrunnable request.
    pub fn ensure_configured(&self) -> Result<(), PipelineError> {
        self.text.ensure_configured().map_err(genai_config)?;
        self.illustrator.ensure_configured().map_err(genai_config)?;
        self.narrator.ensure_configured().map_err(genai_config)?;
        self.characters.ensure_configured().map_err(genai_config)?;
        self.persister.ensure_configured().map_err(storage_config)?;
        Ok(())
    }
}

// The inner message is kept as-is; `PipelineError::Config` adds its own
// prefix when displayed.

fn genai_config(err: GenAiError) -> PipelineError {
    match err {
        GenAiError::Config(msg) => PipelineError::Config(msg),
        other => PipelineError::Config(other.to_string()),
    }
}

fn storage_config(err: StorageError) -> PipelineError {
    match err {
        StorageError::Config(msg) => PipelineError::Config(msg),
        other => PipelineError::Config(other.to_string()),
    }
}
