//! The access gate.
//!
//! Decides whether an account may start a story run, in order: bootstrap
//! the account row on first contact (and deny, since nothing has been
//! purchased), allow unmetered accounts, otherwise consume one credit
//! atomically. The credit decrement is the only cross-request side
//! effect in the pipeline.

use sqlx::PgPool;

use fablehouse_core::access::{AccessDecision, REASON_NEW_ACCOUNT, REASON_NO_ACCESS};
use fablehouse_core::types::DbId;
use fablehouse_db::models::account::CreateAccount;
use fablehouse_db::repositories::{AccountRepo, CreditRepo};

/// Retry bound when racing sibling requests for the same credit row.
const MAX_CONSUME_ATTEMPTS: u32 = 3;

/// Run the entitlement checks for one story request.
///
/// On the pay-per-story path this consumes a credit, so callers must
/// only invoke it once per request and only after every cheaper
/// precondition has passed.
pub async fn check_access(
    pool: &PgPool,
    account_id: DbId,
    email: &str,
) -> Result<AccessDecision, sqlx::Error> {
    let account = match AccountRepo::find_by_id(pool, account_id).await? {
        Some(account) => account,
        None => {
            let input = CreateAccount::bare(account_id, email);
            match AccountRepo::create_if_absent(pool, &input).await? {
                Some(_) => {
                    tracing::info!(account_id, "Bootstrapped account on first contact");
                    return Ok(AccessDecision::Denied {
                        reason: REASON_NEW_ACCOUNT,
                    });
                }
                // Lost the bootstrap race; a sibling created the row.
                None => AccountRepo::find_by_id(pool, account_id)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?,
            }
        }
    };

    if account.has_unmetered_access() {
        return Ok(AccessDecision::Allowed {
            consumed_credit: None,
        });
    }

    for _ in 0..MAX_CONSUME_ATTEMPTS {
        if let Some(credit) = CreditRepo::consume_one(pool, account_id).await? {
            tracing::info!(
                account_id,
                credit_id = credit.id,
                remaining = credit.remaining,
                "Consumed one story credit"
            );
            return Ok(AccessDecision::Allowed {
                consumed_credit: Some(credit.id),
            });
        }
        // A miss can mean a sibling won the newest row while others
        // remain usable; retry only while that holds.
        if !CreditRepo::has_remaining(pool, account_id).await? {
            return Ok(AccessDecision::Denied {
                reason: REASON_NO_ACCESS,
            });
        }
    }

    Ok(AccessDecision::Denied {
        reason: REASON_NO_ACCESS,
    })
}
