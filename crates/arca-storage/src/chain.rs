//! Upload and delete orchestration across an ordered list of backends.
//!
//! The chain replaces implicit try/catch fallback with an explicit adapter
//! list: uploads return on the first backend that succeeds and aggregate
//! every failure for diagnostics; deletions never propagate an error, since
//! an orphaned file must not block deletion of the owning record.

use std::sync::Arc;

use arca_core::{Category, StorageBackend};

use crate::keys;
use crate::traits::{FileLocator, Storage, StorageError, StorageResult, StoredFile};

/// Ordered fallback chain over storage backends.
pub struct StorageChain {
    backends: Vec<Arc<dyn Storage>>,
}

impl StorageChain {
    /// Create a chain from an ordered, non-empty list of backends.
    pub fn new(backends: Vec<Arc<dyn Storage>>) -> StorageResult<Self> {
        if backends.is_empty() {
            return Err(StorageError::ConfigError(
                "Storage chain requires at least one backend".to_string(),
            ));
        }
        Ok(StorageChain { backends })
    }

    /// Backend types in fallback order.
    pub fn backend_types(&self) -> Vec<StorageBackend> {
        self.backends.iter().map(|b| b.backend_type()).collect()
    }

    /// Look up a configured backend by type.
    pub fn backend(&self, backend_type: StorageBackend) -> Option<&Arc<dyn Storage>> {
        self.backends
            .iter()
            .find(|b| b.backend_type() == backend_type)
    }

    /// Upload a file, trying each backend in order.
    ///
    /// The timestamp-prefixed file name is generated once so every backend
    /// is addressed by the same key. Fails only if every backend fails; no
    /// backend leaves partial state behind on failure.
    pub async fn upload(
        &self,
        category: Category,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile> {
        let file_name = keys::generate_file_name(original_name)?;
        let mut attempts: Vec<(StorageBackend, String)> = Vec::new();

        for backend in &self.backends {
            let backend_type = backend.backend_type();
            match backend
                .upload(category, &file_name, original_name, content_type, data)
                .await
            {
                Ok(stored) => {
                    if !attempts.is_empty() {
                        tracing::warn!(
                            backend = %backend_type,
                            category = %category,
                            file_name = %file_name,
                            failed_backends = attempts.len(),
                            "Upload succeeded after fallback"
                        );
                    }
                    return Ok(stored);
                }
                Err(e) => {
                    tracing::warn!(
                        backend = %backend_type,
                        category = %category,
                        file_name = %file_name,
                        error = %e,
                        "Upload attempt failed, trying next backend"
                    );
                    attempts.push((backend_type, e.to_string()));
                }
            }
        }

        tracing::error!(
            category = %category,
            file_name = %file_name,
            attempts = attempts.len(),
            "Upload failed on every configured backend"
        );
        Err(StorageError::AllBackendsFailed { attempts })
    }

    /// Delete a file, trying each backend in order.
    ///
    /// Never fails: the first backend that reports success ends the pass,
    /// and every failure is logged rather than surfaced, so record deletion
    /// is never blocked by an orphaned file.
    pub async fn delete(&self, locator: &FileLocator) {
        if locator.is_empty() {
            tracing::warn!("Delete called with an empty locator; nothing to do");
            return;
        }

        for backend in &self.backends {
            let backend_type = backend.backend_type();
            match backend.delete(locator).await {
                Ok(()) => {
                    tracing::debug!(
                        backend = %backend_type,
                        locator = ?locator,
                        "File deletion handled"
                    );
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        backend = %backend_type,
                        locator = ?locator,
                        error = %e,
                        "Delete attempt failed, trying next backend"
                    );
                }
            }
        }

        tracing::warn!(
            locator = ?locator,
            "File deletion failed on every configured backend; leaving orphan"
        );
    }

    /// Download a file from the first backend that has it.
    pub async fn download(&self, category: Category, file_name: &str) -> StorageResult<Vec<u8>> {
        for backend in &self.backends {
            match backend.download(category, file_name).await {
                Ok(data) => return Ok(data),
                Err(e) => {
                    tracing::debug!(
                        backend = %backend.backend_type(),
                        category = %category,
                        file_name = %file_name,
                        error = %e,
                        "Download attempt failed, trying next backend"
                    );
                }
            }
        }
        Err(StorageError::NotFound(keys::bucket_key(
            category, file_name,
        )))
    }
}
