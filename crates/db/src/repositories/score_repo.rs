//! Repository for the `scores` table and its aggregates.

use playhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::score::{CreateScore, LeaderboardEntry, Score, UserHighScore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, game_version_id, score, created_at";

/// Append-only score storage plus leaderboard queries.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Record a score against a specific game version.
    pub async fn create(pool: &PgPool, input: &CreateScore) -> Result<Score, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores (user_id, game_version_id, score)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(input.user_id)
            .bind(input.game_version_id)
            .bind(input.score)
            .fetch_one(pool)
            .await
    }

    /// Number of scores recorded across every version of a game.
    pub async fn count_for_game(pool: &PgPool, game_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM scores s
             JOIN game_versions v ON v.id = s.game_version_id
             WHERE v.game_id = $1",
        )
        .bind(game_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Best score per user across all versions of a game.
    ///
    /// When a user has tied top scores, the earliest one is reported. Users
    /// are ordered by score descending, then by when the score was achieved,
    /// then by score id.
    pub async fn leaderboard_for_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT username, score, achieved_at FROM (
                SELECT DISTINCT ON (s.user_id)
                       u.username, s.score, s.created_at AS achieved_at, s.id
                FROM scores s
                JOIN game_versions v ON v.id = s.game_version_id
                JOIN users u ON u.id = s.user_id
                WHERE v.game_id = $1
                ORDER BY s.user_id, s.score DESC, s.created_at ASC, s.id ASC
             ) best
             ORDER BY score DESC, achieved_at ASC, id ASC",
        )
        .bind(game_id)
        .fetch_all(pool)
        .await
    }

    /// A user's best score on every game they have played, highest first.
    pub async fn high_scores_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserHighScore>, sqlx::Error> {
        sqlx::query_as::<_, UserHighScore>(
            "SELECT slug, title, description, score, achieved_at FROM (
                SELECT DISTINCT ON (v.game_id)
                       g.slug, g.title, g.description, s.score, s.created_at AS achieved_at
                FROM scores s
                JOIN game_versions v ON v.id = s.game_version_id
                JOIN games g ON g.id = v.game_id
                WHERE s.user_id = $1
                ORDER BY v.game_id, s.score DESC, s.created_at ASC, s.id ASC
             ) best
             ORDER BY score DESC, title ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
