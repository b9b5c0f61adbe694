//! Story entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fablehouse_core::story::StoryStatus;
use fablehouse_core::types::{DbId, Timestamp};

/// A story row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub account_id: DbId,
    pub child_name: String,
    pub age: i32,
    pub interests: String,
    pub story_text: String,
    /// One of `generating`, `completed`, `failed`.
    pub status: String,
    pub narration_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new story. Status always starts as `generating`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
    pub account_id: DbId,
    pub child_name: String,
    pub age: i32,
    pub interests: String,
    pub story_text: String,
}

/// DTO for updating a story. One named optional field per mutable
/// column; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateStory {
    pub status: Option<StoryStatus>,
    pub narration_url: Option<String>,
}

impl UpdateStory {
    pub fn status(status: StoryStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn completed(narration_url: Option<String>) -> Self {
        Self {
            status: Some(StoryStatus::Completed),
            narration_url,
        }
    }
}
