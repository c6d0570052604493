//! Handlers for the `/auth` resource (sign-up, sign-in, sign-out).

use axum::extract::State;
use axum::Json;
use playhub_core::error::CoreError;
use playhub_core::roles::DEFAULT_ROLE_ID;
use playhub_db::models::session::CreateSession;
use playhub_db::models::user::{CreateUser, User};
use playhub_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extractors::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup` and admin `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(
        required(message = "The username field is required."),
        length(min = 4, max = 60, message = "The username must be between 4 and 60 characters.")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "The password field is required."),
        length(min = 5, max = 10, message = "The password must be between 5 and 10 characters.")
    )]
    pub password: Option<String>,
}

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(required(message = "The username field is required."))]
    pub username: Option<String>,
    #[validate(required(message = "The password field is required."))]
    pub password: Option<String>,
}

/// Successful authentication response returned by sign-up and sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: AuthData,
}

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub username: String,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a player account and sign it in.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignUpRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = register_user(&state, input).await?;
    let token = issue_token(&state, &user).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(AuthResponse {
        status: "success",
        message: "User registration successful",
        data: AuthData {
            username: user.username,
            token,
        },
    }))
}

/// POST /api/v1/auth/signin
///
/// Authenticate with username + password and return a fresh token.
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignInRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(username), Some(password)) = (input.username, input.password) else {
        return Err(wrong_credentials());
    };

    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(wrong_credentials)?;

    // 2. Check if the account is active.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Verify password.
    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected sign-in with wrong password");
        return Err(wrong_credentials());
    }

    // 4. Record the login and issue a token.
    UserRepo::record_login(&state.pool, user.id).await?;
    let token = issue_token(&state, &user).await?;

    Ok(Json(AuthResponse {
        status: "success",
        message: "Login successful",
        data: AuthData {
            username: user.username,
            token,
        },
    }))
}

/// POST /api/v1/auth/signout
///
/// Revoke the token presented with this request. Other sessions stay valid.
pub async fn signout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    SessionRepo::revoke(&state.pool, auth_user.token_id).await?;
    tracing::info!(user_id = auth_user.user_id, "User signed out");

    Ok(Json(MessageResponse {
        status: "success",
        message: "Signout successful",
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a player account from a validated sign-up request.
///
/// A taken username is a 409 Conflict.
pub(crate) async fn register_user(state: &AppState, input: SignUpRequest) -> AppResult<User> {
    let (Some(username), Some(password)) = (input.username, input.password) else {
        return Err(AppError::BadRequest("Username and password are required".into()));
    };

    if UserRepo::username_taken(&state.pool, &username, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            password_hash,
            role_id: DEFAULT_ROLE_ID,
        },
    )
    .await?;
    Ok(user)
}

/// Sign a token for `user`, resolve its role claim, and persist the session row.
pub(crate) async fn issue_token(state: &AppState, user: &User) -> AppResult<String> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let issued = generate_access_token(user.id, &role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_id: issued.token_id,
            expires_at: issued.expires_at,
        },
    )
    .await?;

    Ok(issued.token)
}

fn wrong_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Wrong username or password".into(),
    ))
}
