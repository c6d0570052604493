use sqlx::PgPool;

/// Connect, migrate, and check the seeded lookup data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    playhub_db::health_check(&pool).await.unwrap();

    let roles = playhub_db::repositories::RoleRepo::list(&pool).await.unwrap();
    let names: Vec<_> = roles.iter().map(|r| (r.id, r.name.as_str())).collect();
    assert_eq!(names, [(1, "admin"), (2, "player")]);
}

/// Foreign keys from child tables refuse to cascade on their own.
#[sqlx::test(migrations = "./migrations")]
async fn test_child_foreign_keys_restrict(pool: PgPool) {
    let rules: Vec<(String, String)> = sqlx::query_as(
        "SELECT tc.table_name::TEXT, rc.delete_rule::TEXT
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
           ON tc.constraint_name = rc.constraint_name
         WHERE tc.table_name IN ('game_versions', 'scores')",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rules.is_empty());
    for (table, rule) in rules {
        assert_eq!(rule, "RESTRICT", "{table} should restrict deletes");
    }
}
