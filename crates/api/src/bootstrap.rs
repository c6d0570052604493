//! Optional first-run admin account, driven by `ADMIN_USERNAME` / `ADMIN_PASSWORD`.

use playhub_core::error::CoreError;
use playhub_core::roles::ROLE_ADMIN;
use playhub_db::models::user::CreateUser;
use playhub_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Create an admin account named `username` unless one by that name exists.
///
/// Returns `true` when an account was created. An existing account is left
/// alone, whatever its role or password.
pub async fn ensure_admin_account(pool: &PgPool, username: &str, password: &str) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, username).await?.is_some() {
        return Ok(false);
    }

    let role_id = RoleRepo::find_id_by_name(pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| CoreError::not_found("Role", ROLE_ADMIN))?;
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
            role_id,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "Bootstrapped admin account");
    Ok(true)
}
