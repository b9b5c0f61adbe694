//! Service traits the story pipeline consumes.
//!
//! Each trait is one collaborator contract: hand over a prompt, get an
//! artifact or an error back. `ensure_configured` lets the pipeline
//! reject a run before any side effect when credentials are missing;
//! the default implementation accepts, so mocks need not override it.

use async_trait::async_trait;

use fablehouse_core::character::CharacterTraits;
use fablehouse_core::request::StoryRequest;

use crate::error::GenAiError;

/// A generated narrative plus its page segmentation.
#[derive(Debug, Clone)]
pub struct GeneratedStory {
    /// The complete narrative as returned by the model.
    pub full_text: String,
    /// Non-empty page texts in reading order.
    pub pages: Vec<String>,
}

/// Produces the story narrative. Failure is fatal to the run.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Verify credentials are present without performing any call.
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        Ok(())
    }

    async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, GenAiError>;
}

/// Produces one illustration per page, returned as a fetchable URL.
#[async_trait]
pub trait Illustrator: Send + Sync {
    /// Verify credentials are present without performing any call.
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        Ok(())
    }

    async fn illustrate(&self, page_text: &str) -> Result<String, GenAiError>;
}

/// Produces the narration audio for the full story text.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Verify credentials are present without performing any call.
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        Ok(())
    }

    /// Voice identifier recorded on character profiles.
    fn voice_id(&self) -> &str;

    async fn narrate(&self, text: &str) -> Result<Vec<u8>, GenAiError>;
}

/// Extracts the main character's traits from a finished story.
///
/// Implementations absorb unusable model output into deterministic
/// fallbacks; only transport-level failures surface as errors.
#[async_trait]
pub trait CharacterExtractor: Send + Sync {
    /// Verify credentials are present without performing any call.
    fn ensure_configured(&self) -> Result<(), GenAiError> {
        Ok(())
    }

    async fn extract(
        &self,
        story_text: &str,
        request: &StoryRequest,
    ) -> Result<CharacterTraits, GenAiError>;
}
