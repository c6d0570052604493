//! Repository for the `roles` lookup table.

use playhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Read-only access to seeded roles.
pub struct RoleRepo;

impl RoleRepo {
    /// List all roles ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Resolve a role id to its name. Fails with `RowNotFound` for unknown ids.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let row: (String,) = sqlx::query_as("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Find the id of the role named `name`.
    pub async fn find_id_by_name(pool: &PgPool, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| r.0))
    }
}
