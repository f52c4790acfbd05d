use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use arca_core::AppError;
use arca_storage::FileLocator;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Locator fields for a previously uploaded file. A remote-stored file is
/// addressed by `filePath` + `sha`; a locally or inline stored file by the
/// `fileUrl` returned at upload time.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    pub file_path: Option<String>,
    pub sha: Option<String>,
    pub file_url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[utoipa::path(
    delete,
    path = "/api/uploads",
    tag = "uploads",
    params(DeleteQuery),
    responses(
        (status = 200, description = "Deletion handled (always succeeds once a locator is supplied)", body = DeleteResponse),
        (status = 400, description = "No locator supplied", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let locator = FileLocator {
        file_path: query.file_path,
        sha: query.sha,
        file_url: query.file_url,
    };

    if locator.is_empty() {
        return Err(AppError::InvalidInput(
            "No file locator provided; supply fileUrl, or filePath and sha".to_string(),
        )
        .into());
    }

    // Deletion failures are logged by the chain, never surfaced: the owning
    // record's deletion must not be blocked by an orphaned file.
    state.storage.delete(&locator).await;

    Ok(Json(DeleteResponse { success: true }))
}
