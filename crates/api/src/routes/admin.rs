//! Route definitions for `/admins`.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at the API root. Requires the `admin` role (enforced by
/// handler extractors).
///
/// ```text
/// GET /admins   -> list_admins
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/admins", get(admin::list_admins))
}
