use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    fablehouse_db::health_check(&pool).await.unwrap();

    // Verify all five tables exist and start empty.
    let tables = [
        "accounts",
        "credits",
        "stories",
        "story_pages",
        "character_profiles",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// The stories status CHECK only admits the three lifecycle values.
#[sqlx::test(migrations = "./migrations")]
async fn test_story_status_check_constraint(pool: PgPool) {
    sqlx::query("INSERT INTO accounts (id, email) VALUES (1, 'a@example.com')")
        .execute(&pool)
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO stories (account_id, child_name, age, interests, story_text, status)
         VALUES (1, 'Mira', 6, 'dinosaurs', 'text', 'archived')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "unknown status should violate the CHECK");
}
