//! Handlers for user administration (`/admins`, `/users`, `/users/{id}`).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use playhub_core::error::CoreError;
use playhub_core::roles::ROLE_ADMIN;
use playhub_core::types::{DbId, Timestamp};
use playhub_db::models::user::{UpdateUser, User};
use playhub_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extractors::{validate_input, JsonBody, ValidatedJson};
use crate::handlers::auth::{issue_token, register_user, AuthData, AuthResponse, SignUpRequest};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ListResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /users/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 4, max = 60, message = "The username must be between 4 and 60 characters."))]
    pub username: Option<String>,
    #[validate(length(min = 5, max = 10, message = "The password must be between 5 and 10 characters."))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub status: &'static str,
    pub username: String,
}

/// Account listing entry. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub username: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admins
pub async fn list_admins(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ListResponse<UserSummary>>> {
    let admins = UserRepo::list_by_role(&state.pool, ROLE_ADMIN).await?;
    Ok(Json(ListResponse::new(
        admins.into_iter().map(UserSummary::from).collect(),
    )))
}

/// GET /api/v1/users
///
/// Every active account, oldest first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ListResponse<UserSummary>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(ListResponse::new(
        users.into_iter().map(UserSummary::from).collect(),
    )))
}

/// POST /api/v1/users
///
/// Create a player account with the same rules as sign-up. The response
/// carries a token for the new account.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<SignUpRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let user = register_user(&state, input).await?;
    let token = issue_token(&state, &user).await?;
    tracing::info!(
        user_id = user.id,
        username = %user.username,
        admin_id = admin.user_id,
        "User created by admin"
    );

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            status: "success",
            message: "User created",
            data: AuthData {
                username: user.username,
                token,
            },
        }),
    ))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateUserRequest>,
) -> AppResult<Json<UpdateUserResponse>> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;
    validate_input(&input)?;

    if let Some(username) = &input.username {
        if UserRepo::username_taken(&state.pool, username, Some(id)).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "Username already exists".into(),
            )));
        }
    }

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            username: input.username,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found("User", id))?;

    Ok(Json(UpdateUserResponse {
        status: "success",
        username: user.username,
    }))
}

/// DELETE /api/v1/users/{id}
///
/// Soft-deactivate the account and revoke every session it holds.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;

    UserRepo::deactivate(&state.pool, id).await?;
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, revoked, "User deactivated");

    Ok(StatusCode::NO_CONTENT)
}
