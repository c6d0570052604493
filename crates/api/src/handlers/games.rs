//! Handlers for the `/games` resource: catalog, detail, and game lifecycle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use playhub_core::error::CoreError;
use playhub_core::slug::{is_valid_slug, slugify};
use playhub_core::types::{DbId, Timestamp};
use playhub_core::validation::FieldErrors;
use playhub_core::versioning::{archive_path, version_dir, version_label};
use playhub_db::models::game::{CatalogEntry, CreateGame, Game, UpdateGame};
use playhub_db::repositories::GameRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extractors::{validate_input, JsonBody, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::publish;
use crate::query::CatalogParams;
use crate::state::AppState;
use crate::storage::BlobStore;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /games`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGameRequest {
    #[validate(
        required(message = "The title field is required."),
        length(min = 3, max = 60, message = "The title must be between 3 and 60 characters.")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "The description field is required."),
        length(max = 200, message = "The description must not be longer than 200 characters.")
    )]
    pub description: Option<String>,
}

/// Request body for `PUT /games/{slug}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGameRequest {
    #[validate(length(min = 3, max = 60, message = "The title must be between 3 and 60 characters."))]
    pub title: Option<String>,
    #[validate(length(max = 200, message = "The description must not be longer than 200 characters."))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub status: &'static str,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateGameResponse {
    pub status: &'static str,
    pub title: String,
    pub description: String,
}

/// One catalog item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListItem {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub upload_timestamp: Option<Timestamp>,
    pub author: String,
    pub score_count: i64,
}

/// One page of the catalog. `size` is the number of items on this page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePage {
    pub page: i64,
    pub size: usize,
    pub total_elements: i64,
    pub content: Vec<GameListItem>,
}

/// Full game detail, computed from the latest version.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub zip: Option<String>,
    pub version: Option<String>,
    pub upload_timestamp: Option<Timestamp>,
    pub author: String,
    pub score_count: i64,
    pub game_path: Option<String>,
}

fn list_item(entry: CatalogEntry, blobs: &dyn BlobStore) -> GameListItem {
    GameListItem {
        thumbnail: entry.latest_thumbnail_path.as_deref().map(|p| blobs.url(p)),
        upload_timestamp: entry.upload_timestamp,
        slug: entry.slug,
        title: entry.title,
        description: entry.description,
        author: entry.author,
        score_count: entry.score_count,
    }
}

fn detail(entry: CatalogEntry, blobs: &dyn BlobStore) -> GameDetail {
    let latest = entry.latest_version_number;
    GameDetail {
        thumbnail: entry.latest_thumbnail_path.as_deref().map(|p| blobs.url(p)),
        zip: latest.map(|n| blobs.url(&archive_path(&entry.slug, n))),
        version: latest.map(version_label),
        game_path: latest.map(|n| format!("{}/", blobs.url(&version_dir(&entry.slug, n)))),
        upload_timestamp: entry.upload_timestamp,
        slug: entry.slug,
        title: entry.title,
        description: entry.description,
        author: entry.author,
        score_count: entry.score_count,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/games?page=&size=&sortBy=&sortDir=
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<GamePage>> {
    let query = params.to_query();
    let entries = GameRepo::list_catalog(&state.pool, &query).await?;
    let total_elements = GameRepo::count(&state.pool).await?;

    let content: Vec<_> = entries
        .into_iter()
        .map(|entry| list_item(entry, state.blobs.as_ref()))
        .collect();

    Ok(Json(GamePage {
        page: query.page,
        size: content.len(),
        total_elements,
        content,
    }))
}

/// POST /api/v1/games
///
/// Create a game owned by the caller. The slug is derived from the title
/// and must not already exist.
pub async fn create_game(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateGameRequest>,
) -> AppResult<(StatusCode, Json<CreateGameResponse>)> {
    let title = input.title.unwrap_or_default();
    let slug = slugify(&title);
    if slug.is_empty() {
        let mut fields = FieldErrors::new();
        fields.add("title", "The title must contain at least one letter or digit.");
        return Err(CoreError::InvalidFields(fields).into());
    }
    if GameRepo::slug_exists(&state.pool, &slug).await? {
        return Err(CoreError::Conflict("Game title already exists".into()).into());
    }

    let game = GameRepo::create(
        &state.pool,
        &CreateGame {
            title,
            slug,
            description: input.description.unwrap_or_default(),
            created_by: auth.user_id,
        },
    )
    .await?;
    tracing::info!(game_id = game.id, slug = %game.slug, user_id = auth.user_id, "Game created");

    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            status: "success",
            slug: game.slug,
        }),
    ))
}

/// GET /api/v1/games/{slug}
pub async fn get_game(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<GameDetail>> {
    if !is_valid_slug(&slug) {
        return Err(CoreError::not_found("Game", slug).into());
    }
    let entry = GameRepo::find_catalog_entry(&state.pool, &slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Game", &slug))?;
    Ok(Json(detail(entry, state.blobs.as_ref())))
}

/// PUT /api/v1/games/{slug}
///
/// Update title and/or description. Checks run in the order: existence,
/// ownership, field rules.
pub async fn update_game(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    JsonBody(input): JsonBody<UpdateGameRequest>,
) -> AppResult<Json<UpdateGameResponse>> {
    let game = find_owned_game(&state, &slug, auth.user_id).await?;
    validate_input(&input)?;

    let updated = GameRepo::update(
        &state.pool,
        game.id,
        &UpdateGame {
            title: input.title,
            description: input.description,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Game", &slug))?;

    Ok(Json(UpdateGameResponse {
        status: "success",
        title: updated.title,
        description: updated.description,
    }))
}

/// DELETE /api/v1/games/{slug}
///
/// Delete the game with all its versions and scores, then remove its files.
pub async fn delete_game(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let game = find_owned_game(&state, &slug, auth.user_id).await?;

    if !GameRepo::delete_cascade(&state.pool, game.id).await? {
        return Err(CoreError::not_found("Game", &slug).into());
    }
    tracing::info!(game_id = game.id, slug = %slug, "Game deleted");

    if let Err(err) =
        publish::remove_deleted_game_files(&state.pool, state.blobs.as_ref(), &game.slug).await
    {
        tracing::warn!(slug = %game.slug, error = %err, "Failed to remove game files");
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up a game by slug. Slugs that could never have been derived are
/// rejected without a query.
pub(crate) async fn find_game(state: &AppState, slug: &str) -> AppResult<Game> {
    if !is_valid_slug(slug) {
        return Err(CoreError::not_found("Game", slug).into());
    }
    GameRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Game", slug).into())
}

/// Look up a game and require that `user_id` created it.
pub(crate) async fn find_owned_game(
    state: &AppState,
    slug: &str,
    user_id: DbId,
) -> AppResult<Game> {
    let game = find_game(state, slug).await?;
    if game.created_by != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not the game author".into(),
        )));
    }
    Ok(game)
}
