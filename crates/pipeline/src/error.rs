use thiserror::Error;

use fablehouse_genai::GenAiError;

/// Fatal pipeline outcomes. Best-effort stage failures never appear
/// here; they are absorbed into the outcome's diagnostics.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The access gate denied the run. An expected outcome, not a fault.
    #[error("{reason}")]
    Denied { reason: &'static str },

    /// Story text generation failed. Nothing was persisted.
    #[error("story text generation failed: {0}")]
    TextGeneration(GenAiError),

    /// A database write on the fatal path failed.
    #[error("persistence failed: {0}")]
    Persistence(#[from] sqlx::Error),

    /// A required upstream credential or setting is missing. Checked
    /// before the access gate, so no credit is ever consumed for an
    /// unrunnable request.
    #[error("configuration error: {0}")]
    Config(String),
}
