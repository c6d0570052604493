//! Handler for public user profiles.

use axum::extract::{Path, State};
use axum::Json;
use playhub_core::error::CoreError;
use playhub_core::types::Timestamp;
use playhub_db::models::game::GameSummary;
use playhub_db::models::score::UserHighScore;
use playhub_db::repositories::{GameRepo, ScoreRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub registered_timestamp: Timestamp,
    pub authored_games: Vec<GameSummary>,
    pub highscores: Vec<HighScoreItem>,
}

#[derive(Debug, Serialize)]
pub struct HighScoreItem {
    pub game: GameSummary,
    pub score: f64,
    pub timestamp: Timestamp,
}

impl From<UserHighScore> for HighScoreItem {
    fn from(row: UserHighScore) -> Self {
        Self {
            game: GameSummary {
                slug: row.slug,
                title: row.title,
                description: row.description,
            },
            score: row.score,
            timestamp: row.achieved_at,
        }
    }
}

/// GET /api/v1/users/{username}
///
/// Unpublished games only show up when users look at their own profile.
pub async fn get_profile(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| CoreError::not_found("User", &username))?;

    let is_self = viewer.is_some_and(|v| v.user_id == user.id);
    let authored_games = GameRepo::list_by_author(&state.pool, user.id, is_self).await?;
    let highscores = ScoreRepo::high_scores_for_user(&state.pool, user.id).await?;

    Ok(Json(UserProfile {
        username: user.username,
        registered_timestamp: user.created_at,
        authored_games,
        highscores: highscores.into_iter().map(HighScoreItem::from).collect(),
    }))
}
