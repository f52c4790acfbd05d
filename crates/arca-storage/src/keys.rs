//! Storage key and file name generation.
//!
//! All backends address files by the same category-scoped key layout, so
//! name generation and validation live here rather than in any one backend.

use arca_core::Category;

use crate::traits::{StorageError, StorageResult};

const MAX_FILENAME_LENGTH: usize = 255;

/// Sanitize a user-supplied file name.
///
/// Path components are stripped, traversal sequences rejected, and anything
/// outside `[A-Za-z0-9._-]` replaced by `_`. Degenerate names collapse to
/// `"file"`.
pub fn sanitize_file_name(filename: &str) -> StorageResult<String> {
    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(StorageError::InvalidKey(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

/// Generate a collision-resistant file name: millisecond timestamp prefix
/// plus the sanitized original name.
///
/// Two uploads of the same original name within the same millisecond will
/// collide; the timestamp prefix is best-effort, not a guarantee.
pub fn generate_file_name(original_name: &str) -> StorageResult<String> {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let sanitized = sanitize_file_name(original_name)?;
    Ok(format!("{}-{}", timestamp, sanitized))
}

/// Storage key for a file within its category.
pub fn bucket_key(category: Category, file_name: &str) -> String {
    format!("{}/{}", category.dir(), file_name)
}

/// Validate that a storage key cannot escape the backend's root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
