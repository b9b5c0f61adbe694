//! Entitlement decision produced by the access gate.

use crate::types::DbId;

/// Shown when an account exists but has neither an active subscription
/// nor a credit with remaining uses.
pub const REASON_NO_ACCESS: &str =
    "No active subscription or credits available. Please purchase a story or subscribe.";

/// Shown when the account row was created on first contact and nothing
/// has been purchased yet.
pub const REASON_NEW_ACCOUNT: &str =
    "Please purchase a story or subscribe to create stories.";

/// Outcome of the access gate.
///
/// An active subscription allows without touching credits, so
/// `consumed_credit` is `None` on that path and carries the decremented
/// credit row id on the pay-per-story path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed { consumed_credit: Option<DbId> },
    Denied { reason: &'static str },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Denial reason, if denied.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Allowed { .. } => None,
            Self::Denied { reason } => Some(reason),
        }
    }
}
