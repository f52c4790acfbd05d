use crate::keys;
use crate::traits::{FileLocator, Storage, StorageError, StorageResult, StoredFile};
use arca_core::{Category, StorageBackend};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Inline storage implementation
///
/// Encodes the payload as a `data:` URI so the caller can embed it directly
/// in the owning database row. No network or disk I/O takes place; deletion
/// is implicit when the owning row is deleted.
#[derive(Clone, Default)]
pub struct InlineStorage;

impl InlineStorage {
    pub fn new() -> Self {
        InlineStorage
    }
}

#[async_trait]
impl Storage for InlineStorage {
    async fn upload(
        &self,
        category: Category,
        file_name: &str,
        _original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile> {
        let key = keys::bucket_key(category, file_name);
        let payload = BASE64.encode(data);
        let data_url = format!("data:{};base64,{}", content_type, payload);

        tracing::info!(
            key = %key,
            size_bytes = data.len(),
            "Inline storage upload successful"
        );

        Ok(StoredFile {
            file_name: file_name.to_string(),
            file_path: key,
            file_url: data_url,
            file_size: data.len(),
            content_type: content_type.to_string(),
            backend: StorageBackend::Inline,
            github_sha: None,
            github_url: None,
        })
    }

    async fn download(&self, _category: Category, file_name: &str) -> StorageResult<Vec<u8>> {
        // The payload lives in the owning record, not in this backend.
        Err(StorageError::BackendError(format!(
            "Inline storage holds no readable copy of {}",
            file_name
        )))
    }

    async fn delete(&self, _locator: &FileLocator) -> StorageResult<()> {
        // The payload is removed together with the owning record.
        Ok(())
    }

    async fn exists(&self, _category: Category, _file_name: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_data_uri() {
        let storage = InlineStorage::new();
        let stored = storage
            .upload(
                Category::Updates,
                "1-note.txt",
                "note.txt",
                "text/plain",
                b"hello",
            )
            .await
            .unwrap();

        assert_eq!(stored.file_url, "data:text/plain;base64,aGVsbG8=");
        assert_eq!(stored.file_path, "update-files/1-note.txt");
        assert_eq!(stored.file_size, 5);
        assert!(stored.github_sha.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_always_ok() {
        let storage = InlineStorage::new();
        assert!(storage.delete(&FileLocator::default()).await.is_ok());

        let locator = FileLocator {
            file_url: Some("data:text/plain;base64,aGVsbG8=".to_string()),
            ..Default::default()
        };
        assert!(storage.delete(&locator).await.is_ok());
    }
}
