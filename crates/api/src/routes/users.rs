//! Route definitions for `/users`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{admin, users};
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// `GET /users/{key}` treats the key as a username; `PUT` and `DELETE`
/// treat it as a numeric user id.
///
/// ```text
/// GET    /users            -> list_users (admin)
/// POST   /users            -> create_user (admin)
/// GET    /users/{key}      -> get_profile
/// PUT    /users/{key}      -> update_user (admin)
/// DELETE /users/{key}      -> deactivate_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{key}",
            get(users::get_profile)
                .put(admin::update_user)
                .delete(admin::deactivate_user),
        )
}
