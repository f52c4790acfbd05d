use crate::keys;
use crate::traits::{FileLocator, Storage, StorageError, StorageResult, StoredFile};
use arca_core::{Category, StorageBackend};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Files land under the served static root, so the returned `file_url` is a
/// root-relative path the web server can serve directly.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "public/uploads")
    /// * `base_url` - Root-relative URL the directory is served from (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path with security validation
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        keys::validate_key(storage_key)?;

        let path = self.base_path.join(storage_key);

        // Canonicalize what exists; a not-yet-created file is covered by the
        // validate_key checks above.
        if let (Ok(base_canonical), Ok(canonical)) =
            (self.base_path.canonicalize(), path.canonicalize())
        {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Generate public URL for a storage key
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Resolve a delete locator to a storage key.
    ///
    /// Accepts the root-relative `file_url` returned at upload time, or a
    /// `file_path` that is either relative to the storage root or an
    /// absolute path underneath it.
    fn locator_to_key(&self, locator: &FileLocator) -> StorageResult<String> {
        if let Some(url) = locator.file_url.as_deref() {
            let prefix = self.base_url.trim_end_matches('/');
            if let Some(rest) = url.strip_prefix(prefix) {
                let key = rest.trim_start_matches('/');
                if !key.is_empty() {
                    keys::validate_key(key)?;
                    return Ok(key.to_string());
                }
            }
        }

        if let Some(path) = locator.file_path.as_deref() {
            let candidate = Path::new(path);
            if candidate.is_absolute() {
                if let Ok(rest) = candidate.strip_prefix(&self.base_path) {
                    let key = rest.to_string_lossy().to_string();
                    keys::validate_key(&key)?;
                    return Ok(key);
                }
            } else {
                keys::validate_key(path)?;
                return Ok(path.to_string());
            }
        }

        Err(StorageError::InvalidKey(
            "Locator does not reference local storage".to_string(),
        ))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        category: Category,
        file_name: &str,
        _original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile> {
        let key = keys::bucket_key(category, file_name);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredFile {
            file_name: file_name.to_string(),
            file_path: path.display().to_string(),
            file_url: url,
            file_size: size,
            content_type: content_type.to_string(),
            backend: StorageBackend::Local,
            github_sha: None,
            github_url: None,
        })
    }

    async fn download(&self, category: Category, file_name: &str) -> StorageResult<Vec<u8>> {
        let key = keys::bucket_key(category, file_name);
        let path = self.key_to_path(&key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(data)
    }

    async fn delete(&self, locator: &FileLocator) -> StorageResult<()> {
        let key = self.locator_to_key(locator)?;
        let path = self.key_to_path(&key)?;
        let start = std::time::Instant::now();

        // Deleting a file that is already gone is success.
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, category: Category, file_name: &str) -> StorageResult<bool> {
        let key = keys::bucket_key(category, file_name);
        let path = self.key_to_path(&key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
