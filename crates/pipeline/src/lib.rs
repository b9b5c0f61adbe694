//! The story generation pipeline.
//!
//! [`run_story`](orchestrator::run_story) drives one request from the
//! access gate through text generation, parallel illustration,
//! persistence, narration and the best-effort completion stages. The
//! access gate owns the only cross-request side effect (the atomic
//! credit decrement); everything downstream belongs to a single run.

pub mod access;
pub mod email;
pub mod error;
pub mod orchestrator;
pub mod services;

pub use error::PipelineError;
pub use orchestrator::{run_story, PipelineOutcome, StageDiagnostic};
pub use services::Services;
