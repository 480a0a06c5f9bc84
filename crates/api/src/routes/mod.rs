pub mod auth;
pub mod health;
pub mod salaries;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login           login (public)
/// /auth/me              current account (requires auth)
///
/// /users                list, create (admin only)
/// /users/{id}           get, delete (admin only)
///
/// /salaries             upload CSV (admin only)
/// /salaries/filter      filtered USD view (requires auth)
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/salaries", salaries::router(max_upload_bytes))
}
