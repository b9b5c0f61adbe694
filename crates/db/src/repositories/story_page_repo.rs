//! Repository for the `story_pages` table.

use sqlx::PgPool;

use fablehouse_core::types::DbId;

use crate::models::story_page::{CreateStoryPage, StoryPage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, story_id, page_number, body, image_url, created_at";

/// Provides operations for story pages.
pub struct StoryPageRepo;

impl StoryPageRepo {
    /// Insert a new page, returning the created row.
    ///
    /// `(story_id, page_number)` is unique, so re-inserting a page number
    /// for the same story fails with a constraint violation.
    pub async fn create(pool: &PgPool, input: &CreateStoryPage) -> Result<StoryPage, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_pages (story_id, page_number, body, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryPage>(&query)
            .bind(input.story_id)
            .bind(input.page_number)
            .bind(&input.body)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// List a story's pages in reading order.
    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<StoryPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_pages
             WHERE story_id = $1
             ORDER BY page_number ASC"
        );
        sqlx::query_as::<_, StoryPage>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }
}
