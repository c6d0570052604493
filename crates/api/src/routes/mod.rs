pub mod admin;
pub mod auth;
pub mod games;
pub mod health;
pub mod users;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     register (public)
/// /auth/signin                                     sign in (public)
/// /auth/signout                                    sign out (requires auth)
///
/// /games                                           catalog (public), create (auth)
/// /games/{slug}                                    detail (public), update, delete (owner)
/// /games/{slug}/upload                             publish a new version (owner, multipart)
/// /games/{slug}/scores                             leaderboard (public), submit (auth)
///
/// /users                                           list, create (admin only)
/// /users/{username}                                public profile (GET)
/// /users/{id}                                      update, deactivate (admin only)
///
/// /admins                                          list admin accounts (admin only)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/games", games::router(config))
        .merge(users::router())
        .merge(admin::router())
}
