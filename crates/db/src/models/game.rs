//! Game entity model, DTOs, and computed catalog rows.

use playhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub created_by: DbId,
    /// Highest version number ever allocated for this game (`0` before the first upload).
    pub last_version_number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new game. The slug is derived by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub created_by: DbId,
}

/// DTO for updating a game. Only title and description are mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGame {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// One catalog row with its computed fields.
///
/// `latest_*` columns come from the version with the highest number and are
/// all `None` for a game that has never been uploaded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogEntry {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub latest_version_number: Option<i32>,
    pub latest_thumbnail_path: Option<String>,
    pub latest_storage_path: Option<String>,
    pub upload_timestamp: Option<Timestamp>,
    pub score_count: i64,
}

/// Short game description embedded in profile responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
}
