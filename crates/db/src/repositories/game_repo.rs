//! Repository for the `games` table and the catalog read model.

use playhub_core::catalog::{CatalogQuery, SortBy};
use playhub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::game::{CatalogEntry, CreateGame, Game, GameSummary, UpdateGame};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, created_by, last_version_number, \
                       created_at, updated_at";

/// Catalog projection: every game joined with its author, its latest
/// version (highest number), and its score count across all versions.
const CATALOG_SELECT: &str = "\
    SELECT g.id, g.slug, g.title, g.description, u.username AS author, \
           lv.version_number AS latest_version_number, \
           lv.thumbnail_path AS latest_thumbnail_path, \
           lv.storage_path AS latest_storage_path, \
           lv.created_at AS upload_timestamp, \
           sc.score_count \
    FROM games g \
    JOIN users u ON u.id = g.created_by \
    LEFT JOIN LATERAL ( \
        SELECT v.version_number, v.thumbnail_path, v.storage_path, v.created_at \
        FROM game_versions v \
        WHERE v.game_id = g.id \
        ORDER BY v.version_number DESC \
        LIMIT 1 \
    ) lv ON true \
    CROSS JOIN LATERAL ( \
        SELECT COUNT(*) AS score_count \
        FROM scores s \
        JOIN game_versions v ON v.id = s.game_version_id \
        WHERE v.game_id = g.id \
    ) sc";

/// Provides CRUD operations for games and the catalog queries.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game, returning the created row.
    ///
    /// A duplicate slug fails with a unique violation on `uq_games_slug`.
    pub async fn create(pool: &PgPool, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (title, slug, description, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a game by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE slug = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Whether any game already uses `slug`.
    pub async fn slug_exists<'e>(
        executor: impl PgExecutor<'e>,
        slug: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM games WHERE slug = $1)")
            .bind(slug)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// Take the transaction-scoped advisory lock guarding the files under
    /// `slug`. Held until the surrounding transaction ends.
    ///
    /// Publishing and post-delete cleanup both take it, so a cleanup for a
    /// deleted game never interleaves with writes for a new game that reused
    /// the slug.
    pub async fn lock_slug<'e>(executor: impl PgExecutor<'e>, slug: &str) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(slug)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Update title and/or description. The slug is never touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Total number of games, independent of pagination.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM games")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// One page of the catalog, ordered per `query`.
    pub async fn list_catalog(
        pool: &PgPool,
        query: &CatalogQuery,
    ) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let sql = format!(
            "{CATALOG_SELECT} ORDER BY {} LIMIT $1 OFFSET $2",
            catalog_order_clause(query)
        );
        sqlx::query_as::<_, CatalogEntry>(&sql)
            .bind(query.size)
            .bind(query.offset())
            .fetch_all(pool)
            .await
    }

    /// Catalog row for a single game.
    pub async fn find_catalog_entry(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let sql = format!("{CATALOG_SELECT} WHERE g.slug = $1");
        sqlx::query_as::<_, CatalogEntry>(&sql)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Games created by `user_id`, ordered by title.
    ///
    /// Games without any uploaded version are skipped unless
    /// `include_unpublished` is set.
    pub async fn list_by_author(
        pool: &PgPool,
        user_id: DbId,
        include_unpublished: bool,
    ) -> Result<Vec<GameSummary>, sqlx::Error> {
        sqlx::query_as::<_, GameSummary>(
            "SELECT g.slug, g.title, g.description FROM games g
             WHERE g.created_by = $1
               AND ($2 OR EXISTS(SELECT 1 FROM game_versions v WHERE v.game_id = g.id))
             ORDER BY g.title ASC, g.id ASC",
        )
        .bind(user_id)
        .bind(include_unpublished)
        .fetch_all(pool)
        .await
    }

    /// Delete a game together with its versions and their scores.
    ///
    /// Runs in one transaction, child rows first. The game row and its
    /// versions are locked up front so an upload or score submission racing
    /// the delete either completes before it or fails afterwards.
    ///
    /// Returns `false` if the game does not exist.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as("SELECT id FROM games WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(false);
        }
        sqlx::query("SELECT id FROM game_versions WHERE game_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let scores = sqlx::query(
            "DELETE FROM scores
             WHERE game_version_id IN (SELECT id FROM game_versions WHERE game_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let versions = sqlx::query("DELETE FROM game_versions WHERE game_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let games = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(game_id = id, scores, versions, "Deleted game with dependents");
        Ok(games > 0)
    }
}

/// `ORDER BY` body for a catalog query. Always ends with `g.id ASC`.
fn catalog_order_clause(query: &CatalogQuery) -> String {
    let dir = query.sort_dir.as_sql();
    match query.sort_by {
        SortBy::Title => format!("g.title {dir}, g.id ASC"),
        SortBy::Popular => format!("sc.score_count {dir}, g.id ASC"),
        SortBy::UploadDate => format!("lv.created_at {dir} NULLS LAST, g.id ASC"),
    }
}
