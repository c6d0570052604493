//! Session rows backing access-token revocation.

use playhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_id: Uuid,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for recording a freshly issued token.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub token_id: Uuid,
    pub expires_at: Timestamp,
}
