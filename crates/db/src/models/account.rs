//! Account entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fablehouse_core::types::{DbId, Timestamp};

/// An account row from the `accounts` table.
///
/// The id is the external auth provider's subject, not generated here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub is_admin: bool,
    /// Active subscription flag. Set by the billing collaborator.
    pub unlimited_access: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// True when the account may generate stories without spending a credit.
    pub fn has_unmetered_access(&self) -> bool {
        self.is_admin || self.unlimited_access
    }
}

/// DTO for creating a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccount {
    pub id: DbId,
    pub email: String,
    /// Defaults to false if omitted.
    pub is_admin: Option<bool>,
    /// Defaults to false if omitted.
    pub unlimited_access: Option<bool>,
}

impl CreateAccount {
    /// A no-access account, as bootstrapped on first contact.
    pub fn bare(id: DbId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            is_admin: None,
            unlimited_access: None,
        }
    }
}

/// DTO for updating an existing account. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccount {
    pub email: Option<String>,
    pub is_admin: Option<bool>,
    pub unlimited_access: Option<bool>,
}
