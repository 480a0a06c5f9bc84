use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hrdesk_core::error::CoreError;
use hrdesk_core::salary::SalaryError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`SalaryError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hrdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed salary import or filter call.
    #[error(transparent)]
    Salary(#[from] SalaryError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Salary(err) => classify_salary_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Problems with the uploaded file are the client's; store failures are ours.
fn classify_salary_error(err: &SalaryError) -> (StatusCode, &'static str, String) {
    match err {
        SalaryError::Parse(_) | SalaryError::MalformedRow { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_UPLOAD", err.to_string())
        }
        SalaryError::Store(source) => {
            tracing::error!(error = %source, "Salary store error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn core_errors_map_to_http_statuses() {
        assert_eq!(
            status_of(CoreError::NotFound { entity: "User", id: 7 }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::Conflict("taken".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CoreError::Unauthorized("no".into()).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoreError::Forbidden("no".into()).into()),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn malformed_upload_is_a_client_error() {
        let err = SalaryError::MalformedRow {
            line: 3,
            found: 5,
            expected: 38,
        };
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failure_is_a_server_error() {
        let err = SalaryError::Store("connection reset".into());
        assert_eq!(status_of(err.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_row_is_not_found() {
        assert_eq!(
            status_of(sqlx::Error::RowNotFound.into()),
            StatusCode::NOT_FOUND
        );
    }
}
