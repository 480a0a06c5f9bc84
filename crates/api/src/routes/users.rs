//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. Every route requires the admin role.
///
/// ```text
/// GET    /      -> list_users
/// POST   /      -> create_user
/// GET    /{id}  -> get_user
/// DELETE /{id}  -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user).delete(users::delete_user))
}
