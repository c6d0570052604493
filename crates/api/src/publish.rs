//! Publishing a new game version: number allocation, asset writes, and the
//! version record, committed together or not at all.
//!
//! Sequence, all inside one database transaction:
//!
//! 1. Take the slug lock, then allocate the next number (locks the game row).
//! 2. Clear `{slug}/v{n}` of anything an earlier, uncommitted attempt left.
//! 3. Write `game.zip` and the optional `thumbnail.png`.
//! 4. Insert the `game_versions` row.
//! 5. Commit.
//!
//! A failure in 3 or 4 removes the version directory while the row lock is
//! still held, then rolls back, so the number is released and no record
//! points at missing files.
//!
//! [`remove_deleted_game_files`] takes the same slug lock, so cleanup after a
//! delete cannot wipe files of a newer game that reused the slug.

use playhub_core::error::CoreError;
use playhub_core::versioning::{archive_path, thumbnail_path, version_dir};
use playhub_db::models::game::Game;
use playhub_db::models::game_version::{CreateGameVersion, GameVersion};
use playhub_db::repositories::{GameRepo, GameVersionRepo};
use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, AppResult};
use crate::storage::BlobStore;

/// Validated upload payload.
#[derive(Debug, Clone)]
pub struct UploadedAssets {
    pub archive: Vec<u8>,
    pub thumbnail: Option<Vec<u8>>,
}

/// Result of a successful publish: the new row and the blob paths written.
#[derive(Debug, Clone)]
pub struct PublishedVersion {
    pub version: GameVersion,
    pub archive_path: String,
    pub thumbnail_path: Option<String>,
}

/// Publish `assets` as the next version of `game`.
pub async fn publish_version(
    pool: &PgPool,
    blobs: &dyn BlobStore,
    game: &Game,
    assets: &UploadedAssets,
) -> AppResult<PublishedVersion> {
    let mut tx = pool.begin().await?;

    GameRepo::lock_slug(&mut *tx, &game.slug).await?;
    let number = GameVersionRepo::allocate_number(&mut *tx, game.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Game", &game.slug))?;
    let dir = version_dir(&game.slug, number);

    blobs.delete_directory(&dir).await?;

    match write_and_record(&mut *tx, blobs, game, number, assets).await {
        Ok(published) => {
            // A failed commit leaves the files in place: the outcome is
            // unknown, and if it did roll back the next holder of this
            // number clears the directory in step 2.
            tx.commit().await?;
            tracing::info!(
                game_id = game.id,
                slug = %game.slug,
                version = number,
                with_thumbnail = published.thumbnail_path.is_some(),
                "Published game version"
            );
            Ok(published)
        }
        Err(err) => {
            tracing::warn!(
                slug = %game.slug,
                version = number,
                error = %err,
                "Upload failed, removing partially written version"
            );
            if let Err(cleanup) = blobs.delete_directory(&dir).await {
                tracing::error!(dir = %dir, error = %cleanup, "Failed to remove version directory");
            }
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(error = %rollback, "Failed to roll back upload transaction");
            }
            Err(err)
        }
    }
}

/// Remove the files of a deleted game stored under `slug`.
///
/// Skipped when a game with that slug exists again by the time the slug lock
/// is held; its files are not ours to remove. Returns whether the directory
/// was removed.
pub async fn remove_deleted_game_files(
    pool: &PgPool,
    blobs: &dyn BlobStore,
    slug: &str,
) -> AppResult<bool> {
    let mut tx = pool.begin().await?;
    GameRepo::lock_slug(&mut *tx, slug).await?;

    if GameRepo::slug_exists(&mut *tx, slug).await? {
        tracing::info!(slug = %slug, "Slug reused, keeping stored files");
        tx.commit().await?;
        return Ok(false);
    }

    blobs.delete_directory(slug).await?;
    tx.commit().await?;
    Ok(true)
}

async fn write_and_record(
    conn: &mut PgConnection,
    blobs: &dyn BlobStore,
    game: &Game,
    number: i32,
    assets: &UploadedAssets,
) -> Result<PublishedVersion, AppError> {
    let archive = archive_path(&game.slug, number);
    blobs.put(&archive, &assets.archive).await?;

    let thumbnail = match &assets.thumbnail {
        Some(data) => {
            let path = thumbnail_path(&game.slug, number);
            blobs.put(&path, data).await?;
            Some(path)
        }
        None => None,
    };

    let version = GameVersionRepo::create(
        conn,
        &CreateGameVersion {
            game_id: game.id,
            version_number: number,
            storage_path: version_dir(&game.slug, number),
            thumbnail_path: thumbnail.clone(),
        },
    )
    .await?;

    Ok(PublishedVersion {
        version,
        archive_path: archive,
        thumbnail_path: thumbnail,
    })
}
