#[cfg(feature = "backend-github")]
use crate::GithubStorage;
#[cfg(feature = "backend-inline")]
use crate::InlineStorage;
#[cfg(feature = "backend-local")]
use crate::LocalStorage;
use crate::{Storage, StorageChain, StorageError, StorageResult};
use arca_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create the storage fallback chain from configuration.
///
/// Backends are instantiated in the configured fallback order; the order in
/// the returned chain is the order uploads are attempted in.
pub async fn create_chain(config: &Config) -> StorageResult<Arc<StorageChain>> {
    let mut backends: Vec<Arc<dyn Storage>> = Vec::with_capacity(config.fallback_order.len());

    for backend in &config.fallback_order {
        match backend {
            #[cfg(feature = "backend-github")]
            StorageBackend::Github => {
                backends.push(Arc::new(GithubStorage::new(&config.github)?));
            }

            #[cfg(not(feature = "backend-github"))]
            StorageBackend::Github => {
                return Err(StorageError::ConfigError(
                    "GitHub storage backend not available (backend-github feature not enabled)"
                        .to_string(),
                ));
            }

            #[cfg(feature = "backend-local")]
            StorageBackend::Local => {
                let storage =
                    LocalStorage::new(config.local.path.clone(), config.local.base_url.clone())
                        .await?;
                backends.push(Arc::new(storage));
            }

            #[cfg(not(feature = "backend-local"))]
            StorageBackend::Local => {
                return Err(StorageError::ConfigError(
                    "Local storage backend not available (backend-local feature not enabled)"
                        .to_string(),
                ));
            }

            #[cfg(feature = "backend-inline")]
            StorageBackend::Inline => {
                backends.push(Arc::new(InlineStorage::new()));
            }

            #[cfg(not(feature = "backend-inline"))]
            StorageBackend::Inline => {
                return Err(StorageError::ConfigError(
                    "Inline storage backend not available (backend-inline feature not enabled)"
                        .to_string(),
                ));
            }
        }
    }

    Ok(Arc::new(StorageChain::new(backends)?))
}

/// Create a chain for testing (local storage in a temp directory)
#[cfg(all(test, feature = "backend-local"))]
pub async fn create_test_chain() -> StorageResult<Arc<StorageChain>> {
    use std::env;

    let temp_dir = env::temp_dir().join("arca-test-storage");
    let storage = LocalStorage::new(temp_dir, "/uploads".to_string()).await?;
    Ok(Arc::new(StorageChain::new(vec![Arc::new(storage)])?))
}
