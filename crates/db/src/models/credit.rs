//! Credit entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fablehouse_core::types::{DbId, Timestamp};

/// A credit row from the `credits` table.
///
/// Rows are decremented by the access gate and created by the billing
/// collaborator; they are never deleted, so `remaining = 0` rows remain
/// as purchase history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Credit {
    pub id: DbId,
    pub account_id: DbId,
    pub remaining: i32,
    pub credit_type: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new credit. This is the seam the billing
/// collaborator calls after a successful purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCredit {
    pub account_id: DbId,
    pub remaining: i32,
    /// Defaults to `story` if omitted.
    pub credit_type: Option<String>,
}
