//! Story page entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fablehouse_core::types::{DbId, Timestamp};

/// A page row from the `story_pages` table.
///
/// `page_number` is 1-based and unique per story. A null `image_url` is
/// a valid terminal state: the page's illustration failed and the text
/// stands alone.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoryPage {
    pub id: DbId,
    pub story_id: DbId,
    pub page_number: i32,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new story page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoryPage {
    pub story_id: DbId,
    pub page_number: i32,
    pub body: String,
    pub image_url: Option<String>,
}
