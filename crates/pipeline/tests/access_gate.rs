//! Integration tests for the access gate.
//!
//! Ordering matters: account bootstrap, then the unmetered flags, then
//! the credit path. The credit decrement must hold under concurrency.

use sqlx::PgPool;

use fablehouse_core::access::{AccessDecision, REASON_NEW_ACCOUNT, REASON_NO_ACCESS};
use fablehouse_db::models::account::CreateAccount;
use fablehouse_db::models::credit::CreateCredit;
use fablehouse_db::repositories::{AccountRepo, CreditRepo};
use fablehouse_pipeline::access::check_access;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_account(pool: &PgPool, id: i64, is_admin: bool, unlimited: bool) -> i64 {
    let input = CreateAccount {
        id,
        email: format!("a{id}@example.com"),
        is_admin: Some(is_admin),
        unlimited_access: Some(unlimited),
    };
    AccountRepo::create(pool, &input).await.unwrap().id
}

async fn seed_credit(pool: &PgPool, account_id: i64, remaining: i32) -> i64 {
    CreditRepo::create(
        pool,
        &CreateCredit {
            account_id,
            remaining,
            credit_type: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn total_remaining(pool: &PgPool, account_id: i64) -> i64 {
    let (sum,): (i64,) =
        sqlx::query_as("SELECT COALESCE(SUM(remaining), 0) FROM credits WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(pool)
            .await
            .unwrap();
    sum
}

// ---------------------------------------------------------------------------
// Test: Unmetered paths
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_is_allowed_without_spending_credits(pool: PgPool) {
    let account_id = seed_account(&pool, 1, true, false).await;
    seed_credit(&pool, account_id, 1).await;

    let decision = check_access(&pool, account_id, "a1@example.com")
        .await
        .unwrap();
    assert_eq!(
        decision,
        AccessDecision::Allowed {
            consumed_credit: None
        }
    );
    assert_eq!(total_remaining(&pool, account_id).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subscription_allows_without_credits(pool: PgPool) {
    let account_id = seed_account(&pool, 1, false, true).await;

    let decision = check_access(&pool, account_id, "a1@example.com")
        .await
        .unwrap();
    assert!(decision.is_allowed());
}

// ---------------------------------------------------------------------------
// Test: Account bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn first_contact_bootstraps_account_and_denies(pool: PgPool) {
    let decision = check_access(&pool, 42, "new@example.com").await.unwrap();
    assert_eq!(decision.reason(), Some(REASON_NEW_ACCOUNT));

    let account = AccountRepo::find_by_id(&pool, 42).await.unwrap().unwrap();
    assert_eq!(account.email, "new@example.com");
    assert!(!account.has_unmetered_access());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn known_account_without_credits_gets_no_access_reason(pool: PgPool) {
    let account_id = seed_account(&pool, 1, false, false).await;

    let decision = check_access(&pool, account_id, "a1@example.com")
        .await
        .unwrap();
    assert_eq!(decision.reason(), Some(REASON_NO_ACCESS));
}

// ---------------------------------------------------------------------------
// Test: Credit path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn credit_path_spends_exactly_one_per_allowed_check(pool: PgPool) {
    let account_id = seed_account(&pool, 1, false, false).await;
    let credit_id = seed_credit(&pool, account_id, 2).await;

    let first = check_access(&pool, account_id, "a1@example.com")
        .await
        .unwrap();
    assert_eq!(
        first,
        AccessDecision::Allowed {
            consumed_credit: Some(credit_id)
        }
    );
    assert_eq!(total_remaining(&pool, account_id).await, 1);

    let second = check_access(&pool, account_id, "a1@example.com")
        .await
        .unwrap();
    assert!(second.is_allowed());
    assert_eq!(total_remaining(&pool, account_id).await, 0);

    let third = check_access(&pool, account_id, "a1@example.com")
        .await
        .unwrap();
    assert_eq!(third.reason(), Some(REASON_NO_ACCESS));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_checks_cannot_share_one_credit(pool: PgPool) {
    let account_id = seed_account(&pool, 1, false, false).await;
    seed_credit(&pool, account_id, 1).await;

    let a = tokio::spawn({
        let pool = pool.clone();
        async move { check_access(&pool, account_id, "a1@example.com").await }
    });
    let b = tokio::spawn({
        let pool = pool.clone();
        async move { check_access(&pool, account_id, "a1@example.com").await }
    });

    let decisions = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];
    let allowed = decisions.iter().filter(|d| d.is_allowed()).count();
    assert_eq!(allowed, 1, "one credit must admit exactly one caller");
    assert_eq!(total_remaining(&pool, account_id).await, 0);
}
