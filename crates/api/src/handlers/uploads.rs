//! Handler for `POST /games/{slug}/upload`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use playhub_core::assets::{validate_archive, validate_thumbnail, ARCHIVE_FIELD, THUMBNAIL_FIELD};
use playhub_core::error::CoreError;
use playhub_core::validation::FieldErrors;
use playhub_core::versioning::version_label;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::handlers::games::find_owned_game;
use crate::middleware::auth::AuthUser;
use crate::publish::{publish_version, UploadedAssets};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub status: &'static str,
    pub version: String,
    pub game_path: String,
    pub thumbnail_path: Option<String>,
}

/// POST /api/v1/games/{slug}/upload
///
/// Accepts a multipart form with a required `zipfile` field and an optional
/// `thumbnail` field, and publishes them as the next version of the game.
/// Only the game's author may upload.
pub async fn upload_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let game = find_owned_game(&state, &slug, auth.user_id).await?;
    let assets = read_upload_form(&mut multipart, &state.config).await?;

    let published = publish_version(&state.pool, state.blobs.as_ref(), &game, &assets).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            status: "success",
            version: version_label(published.version.version_number),
            game_path: state.blobs.url(&published.archive_path),
            thumbnail_path: published.thumbnail_path.as_deref().map(|p| state.blobs.url(p)),
        }),
    ))
}

/// Drain the multipart stream and validate both assets.
///
/// An empty `thumbnail` part (a form submitted without choosing a file)
/// counts as no thumbnail. Unknown fields are ignored.
async fn read_upload_form(
    multipart: &mut Multipart,
    config: &ServerConfig,
) -> AppResult<UploadedAssets> {
    let mut archive: Option<Vec<u8>> = None;
    let mut thumbnail: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != ARCHIVE_FIELD && name != THUMBNAIL_FIELD {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if name == ARCHIVE_FIELD {
            archive = Some(data.to_vec());
        } else if !data.is_empty() {
            thumbnail = Some(data.to_vec());
        }
    }

    let mut errors = FieldErrors::new();
    match &archive {
        Some(data) => validate_archive(data, config.max_archive_bytes, &mut errors),
        None => errors.add(ARCHIVE_FIELD, "The zipfile field is required."),
    }
    if let Some(data) = &thumbnail {
        validate_thumbnail(data, config.max_thumbnail_bytes, &mut errors);
    }
    errors.into_result().map_err(AppError::Core)?;

    match archive {
        Some(archive) => Ok(UploadedAssets { archive, thumbnail }),
        None => Err(CoreError::Validation("The zipfile field is required.".into()).into()),
    }
}
