//! Character traits extracted from a finished story.

use crate::request::StoryRequest;

/// Voice used for narration and recorded on every character profile.
pub const NARRATION_VOICE: &str = "Rachel";

/// Appearance and personality of the story's main character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterTraits {
    pub appearance: String,
    pub personality: String,
}

impl CharacterTraits {
    /// Deterministic traits used when the extraction model returns
    /// unusable output. Built from the request alone.
    pub fn fallback(request: &StoryRequest) -> Self {
        Self {
            appearance: fallback_appearance(request.age),
            personality: request.interests.clone(),
        }
    }
}

/// Placeholder appearance derived from the child's age.
pub fn fallback_appearance(age: i32) -> String {
    format!("A {age}-year-old child")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_uses_age_and_interests() {
        let request = StoryRequest {
            child_name: "Mira".to_string(),
            age: 6,
            interests: "dinosaurs".to_string(),
        };
        let traits = CharacterTraits::fallback(&request);
        assert_eq!(traits.appearance, "A 6-year-old child");
        assert_eq!(traits.personality, "dinosaurs");
    }
}
