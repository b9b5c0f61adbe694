//! Repository for the `accounts` table.

use sqlx::PgPool;

use fablehouse_core::types::DbId;

use crate::models::account::{Account, CreateAccount, UpdateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, is_admin, unlimited_access, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (id, email, is_admin, unlimited_access)
             VALUES ($1, $2, COALESCE($3, FALSE), COALESCE($4, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(input.id)
            .bind(&input.email)
            .bind(input.is_admin)
            .bind(input.unlimited_access)
            .fetch_one(pool)
            .await
    }

    /// Insert an account unless one with the same id already exists.
    ///
    /// Returns `Some(account)` only when this call created the row, so
    /// callers can distinguish first contact from an existing account
    /// even under concurrent bootstraps.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateAccount,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (id, email, is_admin, unlimited_access)
             VALUES ($1, $2, COALESCE($3, FALSE), COALESCE($4, FALSE))
             ON CONFLICT (id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(input.id)
            .bind(&input.email)
            .bind(input.is_admin)
            .bind(input.unlimited_access)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an account. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET
                email = COALESCE($2, email),
                is_admin = COALESCE($3, is_admin),
                unlimited_access = COALESCE($4, unlimited_access),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(input.is_admin)
            .bind(input.unlimited_access)
            .fetch_optional(pool)
            .await
    }
}
