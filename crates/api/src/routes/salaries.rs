//! Route definitions for the `/salaries` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::salaries;
use crate::state::AppState;

/// Routes mounted at `/salaries`.
///
/// ```text
/// POST /        -> upload (admin only, multipart, body capped at max_upload_bytes)
/// POST /filter  -> filter (requires auth)
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(salaries::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/filter", post(salaries::filter))
}
