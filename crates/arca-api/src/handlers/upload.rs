use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, validate_file_size};
use arca_core::{AppError, Category};
use arca_storage::StoredFile;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Upload result returned to the record managers. Field names match the
/// wire contract the admin portal persists into its records.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_name: String,
    pub file_path: String,
    pub file_url: String,
    pub file_size: usize,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

impl From<StoredFile> for UploadResponse {
    fn from(stored: StoredFile) -> Self {
        UploadResponse {
            file_name: stored.file_name,
            file_path: stored.file_path,
            file_url: stored.file_url,
            file_size: stored.file_size,
            file_type: stored.content_type,
            github_sha: stored.github_sha,
            github_url: stored.github_url,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "All storage backends failed", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let (data, original_filename, content_type, bucket) =
        extract_multipart_file(multipart).await?;

    let bucket =
        bucket.ok_or_else(|| AppError::InvalidInput("No bucket provided".to_string()))?;
    // Reject unknown buckets before any storage I/O.
    let category: Category = bucket.parse()?;

    if data.is_empty() {
        return Err(AppError::InvalidInput("Empty file".to_string()).into());
    }
    validate_file_size(data.len(), state.config.max_file_size_bytes)?;

    tracing::info!(
        bucket = %category,
        original_filename = %original_filename,
        file_size = data.len(),
        "Processing upload"
    );

    let stored = state
        .storage
        .upload(category, &original_filename, &content_type, &data)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, bucket = %category, "Failed to upload to storage");
            AppError::Storage(format!("Failed to upload file: {}", e))
        })?;

    Ok(Json(UploadResponse::from(stored)))
}
