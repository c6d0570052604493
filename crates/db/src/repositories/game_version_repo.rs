//! Repository for the `game_versions` table and the per-game version counter.
//!
//! Version numbers are allocated from `games.last_version_number`. The
//! increment takes a row lock on the game, so concurrent uploads of the same
//! game serialize on that row until the allocating transaction ends, while
//! uploads of different games proceed independently. A rolled-back upload
//! also rolls back its increment, which keeps the sequence gap-free.

use playhub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::game_version::{CreateGameVersion, GameVersion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, version_number, storage_path, thumbnail_path, created_at";

/// Provides allocation and lookup of game versions.
pub struct GameVersionRepo;

impl GameVersionRepo {
    /// Reserve the next version number for `game_id`.
    ///
    /// Must run inside the transaction that also inserts the version; the
    /// game row stays locked until that transaction commits or rolls back.
    /// Returns `None` if the game does not exist.
    pub async fn allocate_number<'e>(
        executor: impl PgExecutor<'e>,
        game_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE games SET last_version_number = last_version_number + 1
             WHERE id = $1
             RETURNING last_version_number",
        )
        .bind(game_id)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Insert a version row, returning it.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateGameVersion,
    ) -> Result<GameVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_versions (game_id, version_number, storage_path, thumbnail_path)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(input.game_id)
            .bind(input.version_number)
            .bind(&input.storage_path)
            .bind(&input.thumbnail_path)
            .fetch_one(executor)
            .await
    }

    /// The version with the highest number, if the game has any.
    pub async fn find_latest_for_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Option<GameVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_versions
             WHERE game_id = $1
             ORDER BY version_number DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(game_id)
            .fetch_optional(pool)
            .await
    }

    /// All versions of a game, newest first.
    pub async fn list_by_game(pool: &PgPool, game_id: DbId) -> Result<Vec<GameVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_versions
             WHERE game_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }
}
