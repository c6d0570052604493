//! Score entity model and leaderboard aggregates.

use playhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `scores` table. Scores are never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Score {
    pub id: DbId,
    pub user_id: DbId,
    pub game_version_id: DbId,
    pub score: f64,
    pub created_at: Timestamp,
}

/// DTO for recording a score against a specific version.
#[derive(Debug, Clone)]
pub struct CreateScore {
    pub user_id: DbId,
    pub game_version_id: DbId,
    pub score: f64,
}

/// A user's best score on one game, with the time that score was recorded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: f64,
    pub achieved_at: Timestamp,
}

/// A user's best score on one game, joined with the game summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserHighScore {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub score: f64,
    pub achieved_at: Timestamp,
}
