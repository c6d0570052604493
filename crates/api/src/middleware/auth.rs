//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use playhub_core::error::CoreError;
use playhub_core::types::DbId;
use playhub_db::repositories::SessionRepo;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token must verify and its session must be neither revoked nor expired.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"admin"` or `"player"`).
    pub role: String,
    /// The presented token's `jti`, used to revoke it on sign-out.
    pub token_id: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        authenticate(auth_header, state).await
    }
}

/// Like [`AuthUser`], but anonymous requests are allowed through as `None`.
///
/// A request that does send an `Authorization` header must still carry a
/// valid token; it is rejected otherwise.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(AUTHORIZATION) {
            None => Ok(Self(None)),
            Some(value) => {
                let header = value
                    .to_str()
                    .map_err(|_| unauthorized("Malformed Authorization header"))?;
                Ok(Self(Some(authenticate(header, state).await?)))
            }
        }
    }
}

async fn authenticate(auth_header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    let token_id =
        Uuid::parse_str(&claims.jti).map_err(|_| unauthorized("Invalid or expired token"))?;

    SessionRepo::find_active(&state.pool, token_id)
        .await?
        .ok_or_else(|| unauthorized("Session has been revoked or has expired"))?;

    Ok(AuthUser {
        user_id: claims.sub,
        role: claims.role,
        token_id,
    })
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}
