//! Handlers for `/games/{slug}/scores`: leaderboard and score submission.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use playhub_core::error::CoreError;
use playhub_core::types::Timestamp;
use playhub_core::validation::validate_score_value;
use playhub_db::models::score::{CreateScore, LeaderboardEntry};
use playhub_db::repositories::{GameVersionRepo, ScoreRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extractors::{validate_input, JsonBody};
use crate::handlers::games::find_game;
use crate::middleware::auth::AuthUser;
use crate::response::StatusResponse;
use crate::state::AppState;

/// Request body for `POST /games/{slug}/scores`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitScoreRequest {
    #[validate(required(message = "The score field is required."))]
    pub score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub scores: Vec<LeaderboardItem>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardItem {
    pub username: String,
    pub score: f64,
    pub timestamp: Timestamp,
}

impl From<LeaderboardEntry> for LeaderboardItem {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            username: entry.username,
            score: entry.score,
            timestamp: entry.achieved_at,
        }
    }
}

/// GET /api/v1/games/{slug}/scores
///
/// Each player's best score across all versions, highest first.
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<LeaderboardResponse>> {
    let game = find_game(&state, &slug).await?;
    let entries = ScoreRepo::leaderboard_for_game(&state.pool, game.id).await?;

    Ok(Json(LeaderboardResponse {
        scores: entries.into_iter().map(LeaderboardItem::from).collect(),
    }))
}

/// POST /api/v1/games/{slug}/scores
///
/// Record a score against the game's latest version. An unknown game is
/// reported before any field rule.
pub async fn submit_score(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    JsonBody(input): JsonBody<SubmitScoreRequest>,
) -> AppResult<(StatusCode, Json<StatusResponse>)> {
    let game = find_game(&state, &slug).await?;
    validate_input(&input)?;
    let value = input.score.unwrap_or_default();
    validate_score_value(value)?;

    let version = GameVersionRepo::find_latest_for_game(&state.pool, game.id)
        .await?
        .ok_or_else(|| CoreError::not_found("GameVersion", &slug))?;

    let score = ScoreRepo::create(
        &state.pool,
        &CreateScore {
            user_id: auth.user_id,
            game_version_id: version.id,
            score: value,
        },
    )
    .await?;
    tracing::debug!(
        score_id = score.id,
        slug = %slug,
        version = version.version_number,
        user_id = auth.user_id,
        "Score recorded"
    );

    Ok((StatusCode::CREATED, Json(StatusResponse::success())))
}
