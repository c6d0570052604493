//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use playhub_core::roles::DEFAULT_ROLE_ID;
use playhub_core::types::DbId;
use playhub_core::versioning::{thumbnail_path, version_dir};
use playhub_db::models::game::{CreateGame, Game};
use playhub_db::models::game_version::{CreateGameVersion, GameVersion};
use playhub_db::models::user::{CreateUser, User};
use playhub_db::repositories::{GameRepo, GameVersionRepo, UserRepo};
use sqlx::PgPool;

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role_id: DEFAULT_ROLE_ID,
        },
    )
    .await
    .unwrap()
}

pub async fn create_game(pool: &PgPool, author: DbId, title: &str, slug: &str) -> Game {
    GameRepo::create(
        pool,
        &CreateGame {
            title: title.to_string(),
            slug: slug.to_string(),
            description: format!("{title} description"),
            created_by: author,
        },
    )
    .await
    .unwrap()
}

/// Allocate a number and record a version in one transaction, as an upload does.
pub async fn publish_version(pool: &PgPool, game: &Game, with_thumbnail: bool) -> GameVersion {
    let mut tx = pool.begin().await.unwrap();
    let number = GameVersionRepo::allocate_number(&mut *tx, game.id)
        .await
        .unwrap()
        .expect("game exists");
    let version = GameVersionRepo::create(
        &mut *tx,
        &CreateGameVersion {
            game_id: game.id,
            version_number: number,
            storage_path: version_dir(&game.slug, number),
            thumbnail_path: with_thumbnail.then(|| thumbnail_path(&game.slug, number)),
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();
    version
}

/// Insert a score with a controlled timestamp, `offset_secs` after a fixed base.
pub async fn insert_score_at(
    pool: &PgPool,
    user_id: DbId,
    version_id: DbId,
    score: f64,
    offset_secs: i64,
) -> DbId {
    let created_at = base_time() + Duration::seconds(offset_secs);
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO scores (user_id, game_version_id, score, created_at)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(version_id)
    .bind(score)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

/// Rewrite a version's `created_at`, `offset_secs` after a fixed base.
pub async fn set_version_time(pool: &PgPool, version_id: DbId, offset_secs: i64) {
    sqlx::query("UPDATE game_versions SET created_at = $2 WHERE id = $1")
        .bind(version_id)
        .bind(base_time() + Duration::seconds(offset_secs))
        .execute(pool)
        .await
        .unwrap();
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}
