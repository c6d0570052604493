//! Repository for the `sessions` table.

use playhub_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::{CreateSession, Session};

const COLUMNS: &str = "id, user_id, token_id, expires_at, revoked_at, created_at";

/// Tracks issued access tokens so they can be revoked before they expire.
pub struct SessionRepo;

impl SessionRepo {
    /// Record a newly issued token.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, token_id, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(input.token_id)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find the session for `token_id` if it is neither revoked nor expired.
    pub async fn find_active(pool: &PgPool, token_id: Uuid) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE token_id = $1 AND revoked_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_id)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single token. Returns `true` if an active session was revoked.
    pub async fn revoke(pool: &PgPool, token_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = NOW() WHERE token_id = $1 AND revoked_at IS NULL",
        )
        .bind(token_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every outstanding token of a user. Returns the number revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = NOW() WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
