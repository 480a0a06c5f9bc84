//! Handlers for the `/users` resource (account management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hrdesk_core::error::CoreError;
use hrdesk_core::types::DbId;
use hrdesk_db::models::user::{CreateUser, UserResponse};
use hrdesk_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_new_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/v1/users
///
/// Create a regular (non-admin) account and return it with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be blank".into(),
        )));
    }
    validate_new_password(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username '{username}' is already taken"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent insert of the same name still surfaces as 409 through uq_users_username.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
            is_admin: false,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".into(),
        ));
    }

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
