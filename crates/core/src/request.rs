//! Story request parameters and their validation rules.

use serde::Deserialize;

use crate::error::CoreError;

/// Longest accepted child name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Longest accepted interests text, in characters.
pub const MAX_INTERESTS_CHARS: usize = 500;

/// Inclusive age range the stories are written for.
pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 17;

/// Parameters for one story generation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    pub child_name: String,
    pub age: i32,
    pub interests: String,
}

impl StoryRequest {
    /// Checks field bounds before any credit is touched or any
    /// external call is made.
    pub fn validate(&self) -> Result<(), CoreError> {
        let name = self.child_name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("childName must not be empty"));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(CoreError::validation(format!(
                "childName must be at most {MAX_NAME_CHARS} characters"
            )));
        }
        if self.age < MIN_AGE || self.age > MAX_AGE {
            return Err(CoreError::validation(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}"
            )));
        }
        let interests = self.interests.trim();
        if interests.is_empty() {
            return Err(CoreError::validation("interests must not be empty"));
        }
        if interests.chars().count() > MAX_INTERESTS_CHARS {
            return Err(CoreError::validation(format!(
                "interests must be at most {MAX_INTERESTS_CHARS} characters"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
