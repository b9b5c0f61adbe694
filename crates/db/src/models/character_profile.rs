//! Character profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fablehouse_core::types::{DbId, Timestamp};

/// A character profile row from the `character_profiles` table.
///
/// Written best-effort after a story completes; a missing profile never
/// invalidates its story.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterProfile {
    pub id: DbId,
    pub account_id: DbId,
    pub story_id: DbId,
    pub name: String,
    pub age: i32,
    pub appearance: String,
    pub personality: String,
    pub image_url: Option<String>,
    pub voice_id: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new character profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacterProfile {
    pub account_id: DbId,
    pub story_id: DbId,
    pub name: String,
    pub age: i32,
    pub appearance: String,
    pub personality: String,
    pub image_url: Option<String>,
    pub voice_id: String,
}
