//! Repository for the `stories` table.

use sqlx::PgPool;

use fablehouse_core::types::DbId;

use crate::models::story::{CreateStory, Story, UpdateStory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, child_name, age, interests, story_text, \
                       status, narration_url, created_at, updated_at";

/// Provides CRUD operations for stories.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story with status `generating`, returning the row.
    pub async fn create(pool: &PgPool, input: &CreateStory) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (account_id, child_name, age, interests, story_text)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(input.account_id)
            .bind(&input.child_name)
            .bind(input.age)
            .bind(&input.interests)
            .bind(&input.story_text)
            .fetch_one(pool)
            .await
    }

    /// Find a story by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a story by id, restricted to its owning account.
    ///
    /// A story owned by someone else is indistinguishable from a missing
    /// one, so the read path never leaks foreign story ids.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        account_id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1 AND account_id = $2");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// List an account's stories, most recently created first.
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             WHERE account_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// Update a story. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                status = COALESCE($2, status),
                narration_url = COALESCE($3, narration_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.narration_url)
            .fetch_optional(pool)
            .await
    }
}
