//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use hrdesk_core::error::CoreError;
use hrdesk_db::models::user::UserResponse;
use hrdesk_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Message shared by every login failure so callers cannot probe usernames.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| {
            tracing::info!(username = %input.username, "Login failed: unknown user");
            AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let access_token =
        generate_access_token(user.id, &user.username, user.role(), &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = user.role(), "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(&user),
    }))
}

/// GET /api/v1/auth/me
///
/// Return the account behind the presented token.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let found = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(UserResponse::from(&found)))
}
