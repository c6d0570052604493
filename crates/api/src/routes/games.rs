//! Route definitions for the `/games` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers::{games, scores, uploads};
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /                 -> list_games
/// POST   /                 -> create_game
/// GET    /{slug}           -> get_game
/// PUT    /{slug}           -> update_game
/// DELETE /{slug}           -> delete_game
/// POST   /{slug}/upload    -> upload_version
/// GET    /{slug}/scores    -> leaderboard
/// POST   /{slug}/scores    -> submit_score
/// ```
///
/// Only the upload route accepts bodies larger than axum's default limit.
pub fn router(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route(
            "/{slug}",
            get(games::get_game)
                .put(games::update_game)
                .delete(games::delete_game),
        )
        .route(
            "/{slug}/upload",
            post(uploads::upload_version).layer(DefaultBodyLimit::max(config.upload_body_limit())),
        )
        .route(
            "/{slug}/scores",
            get(scores::leaderboard).post(scores::submit_score),
        )
}
