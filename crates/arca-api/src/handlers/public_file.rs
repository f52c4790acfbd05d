use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use arca_core::{AppError, Category, StorageBackend};
use arca_storage::StorageError;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/uploads/{dir}/{file_name}",
    tag = "uploads",
    params(
        ("dir" = String, Path, description = "Physical bucket directory (e.g. budget-files)"),
        ("file_name" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path((dir, file_name)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let category = Category::from_dir(&dir)
        .ok_or_else(|| AppError::NotFound(format!("Unknown upload directory '{}'", dir)))?;

    // Root-relative URLs are a local-backend convention; serve from it
    // directly rather than walking the whole chain.
    let local = state
        .storage
        .backend(StorageBackend::Local)
        .ok_or_else(|| AppError::NotFound("Local storage is not configured".to_string()))?;

    let data = local
        .download(category, &file_name)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {}", key)),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        })?;

    let mime = mime_guess::from_path(&file_name).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], data))
}
