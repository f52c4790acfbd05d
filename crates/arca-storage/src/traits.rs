//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, the uniform upload result, and the locator used for deletion.

use arca_core::{Category, StorageBackend};
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("All storage backends failed: {}", format_attempts(.attempts))]
    AllBackendsFailed {
        attempts: Vec<(StorageBackend, String)>,
    },
}

fn format_attempts(attempts: &[(StorageBackend, String)]) -> String {
    attempts
        .iter()
        .map(|(backend, reason)| format!("{}: {}", backend, reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Uniform result of a successful upload, independent of which backend
/// accepted the file.
///
/// `file_url` is the caller-facing locator: an absolute raw-content URL
/// (github), a root-relative static path (local), or a `data:` URI (inline).
/// `github_sha` is present only when the remote backend succeeded; callers
/// should persist it alongside `file_path` so the object can be deleted
/// later (remote deletion without the sha is best-effort only).
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub file_path: String,
    pub file_url: String,
    pub file_size: usize,
    pub content_type: String,
    pub backend: StorageBackend,
    pub github_sha: Option<String>,
    pub github_url: Option<String>,
}

/// Locator for a previously stored file, assembled from whatever fields the
/// caller persisted. Backends use the fields they understand and report an
/// error when the locator lacks what they need, letting the chain fall
/// through to the next backend.
#[derive(Debug, Clone, Default)]
pub struct FileLocator {
    /// Repository path (github) or disk path (local) the file was stored at.
    pub file_path: Option<String>,
    /// Content hash required by the remote content API to delete an object.
    pub sha: Option<String>,
    /// The caller-facing URL returned at upload time.
    pub file_url: Option<String>,
}

impl FileLocator {
    pub fn is_empty(&self) -> bool {
        self.file_path.is_none() && self.sha.is_none() && self.file_url.is_none()
    }
}

/// Storage abstraction trait
///
/// All storage backends (github, local filesystem, inline) must implement
/// this trait. This allows the fallback chain to work with any backend
/// without coupling to specific implementation details.
///
/// **Key format:** Keys are category-scoped: `{category_dir}/{file_name}`.
/// See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a file under the given category and return the stored result.
    ///
    /// `file_name` is the timestamp-prefixed name generated by the chain;
    /// `original_name` is the name the user supplied (used in commit
    /// messages by the remote backend).
    async fn upload(
        &self,
        category: Category,
        file_name: &str,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile>;

    /// Download a file's bytes by category and file name.
    async fn download(&self, category: Category, file_name: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file described by the locator.
    ///
    /// Deleting an object that is already absent is success (idempotent).
    /// A locator missing the fields this backend needs is an error so the
    /// chain can try the next backend.
    async fn delete(&self, locator: &FileLocator) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, category: Category, file_name: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
