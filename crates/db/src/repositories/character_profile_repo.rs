//! Repository for the `character_profiles` table.

use sqlx::PgPool;

use fablehouse_core::types::DbId;

use crate::models::character_profile::{CharacterProfile, CreateCharacterProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, story_id, name, age, appearance, personality, \
                       image_url, voice_id, created_at";

/// Provides operations for character profiles.
pub struct CharacterProfileRepo;

impl CharacterProfileRepo {
    /// Insert a new character profile, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCharacterProfile,
    ) -> Result<CharacterProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO character_profiles
                (account_id, story_id, name, age, appearance, personality, image_url, voice_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CharacterProfile>(&query)
            .bind(input.account_id)
            .bind(input.story_id)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.appearance)
            .bind(&input.personality)
            .bind(&input.image_url)
            .bind(&input.voice_id)
            .fetch_one(pool)
            .await
    }

    /// List an account's saved characters, most recent first.
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<CharacterProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM character_profiles
             WHERE account_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CharacterProfile>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }
}
