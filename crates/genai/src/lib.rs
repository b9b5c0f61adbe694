//! HTTP clients for the external generation services.
//!
//! Three upstreams: a chat-completion service for story text and
//! character extraction, a prediction service for page illustrations,
//! and a text-to-speech service for narration. Each client carries
//! explicit timeouts; the orchestrator consumes them through the
//! traits in [`traits`], so tests can substitute mocks.

pub mod error;
mod http;
pub mod image;
pub mod narration;
pub mod text;
pub mod traits;

pub use error::GenAiError;
pub use image::{ReplicateClient, ReplicateConfig};
pub use narration::{ElevenLabsClient, ElevenLabsConfig};
pub use text::{OpenAiClient, OpenAiConfig};
pub use traits::{CharacterExtractor, GeneratedStory, Illustrator, Narrator, TextGenerator};
