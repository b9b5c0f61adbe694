//! Repository for the `credits` table.

use sqlx::PgPool;

use fablehouse_core::types::DbId;

use crate::models::credit::{CreateCredit, Credit};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, remaining, credit_type, created_at";

/// Provides operations for credits.
///
/// Credits are created by the billing collaborator and decremented by
/// the access gate; there is deliberately no update or delete method.
pub struct CreditRepo;

impl CreditRepo {
    /// Insert a new credit, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCredit) -> Result<Credit, sqlx::Error> {
        let query = format!(
            "INSERT INTO credits (account_id, remaining, credit_type)
             VALUES ($1, $2, COALESCE($3, 'story'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credit>(&query)
            .bind(input.account_id)
            .bind(input.remaining)
            .bind(&input.credit_type)
            .fetch_one(pool)
            .await
    }

    /// Find a credit by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Credit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credits WHERE id = $1");
        sqlx::query_as::<_, Credit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an account's credits, most recently purchased first.
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<Credit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM credits
             WHERE account_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Credit>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically decrement the account's most recent usable credit by 1.
    ///
    /// The decrement and the `remaining > 0` guard are one statement, so
    /// two concurrent calls against a credit with `remaining = 1` can
    /// never both succeed: the second waits on the row lock, re-checks
    /// the guard against the updated row, matches nothing and returns
    /// `None`. A `None` therefore means "this attempt got no credit",
    /// not "the account has none left"; callers that lose the row to a
    /// sibling may retry while [`Self::has_remaining`] still holds.
    pub async fn consume_one(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<Credit>, sqlx::Error> {
        let query = format!(
            "UPDATE credits
             SET remaining = remaining - 1
             WHERE id = (
                 SELECT id FROM credits
                 WHERE account_id = $1 AND remaining > 0
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             ) AND remaining > 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credit>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// True when the account still has at least one usable credit.
    pub async fn has_remaining(pool: &PgPool, account_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM credits WHERE account_id = $1 AND remaining > 0)",
        )
        .bind(account_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
