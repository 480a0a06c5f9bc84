//! Handlers for the `/salaries` resource.

use axum::extract::{Multipart, State};
use axum::Json;
use hrdesk_core::salary::{FilterCondition, SalaryResponse, UploadReport};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the salary spreadsheet.
pub const UPLOAD_FIELD: &str = "file";

/// POST /api/v1/salaries
///
/// Replace the stored salary set with the rows of the uploaded CSV file.
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadReport>>> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some(data);
        break;
    }

    let file = file.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{UPLOAD_FIELD}'"))
    })?;

    tracing::info!(user_id = admin.user_id, bytes = file.len(), "Salary upload received");

    let report = state.salaries.import(&file).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/salaries/filter
///
/// Return stored salaries matching the condition, amounts in USD.
pub async fn filter(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(condition): Json<FilterCondition>,
) -> AppResult<Json<DataResponse<Vec<SalaryResponse>>>> {
    let salaries = state.salaries.filter(&condition).await?;
    Ok(Json(DataResponse { data: salaries }))
}
