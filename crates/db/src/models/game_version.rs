//! Game version entity model and DTOs.

use playhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `game_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameVersion {
    pub id: DbId,
    pub game_id: DbId,
    pub version_number: i32,
    /// Blob directory holding this version's files (`{slug}/v{n}`).
    pub storage_path: String,
    pub thumbnail_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording an uploaded version. The number comes from the allocator.
#[derive(Debug, Clone)]
pub struct CreateGameVersion {
    pub game_id: DbId,
    pub version_number: i32,
    pub storage_path: String,
    pub thumbnail_path: Option<String>,
}
