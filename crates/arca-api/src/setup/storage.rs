//! Storage setup and initialization

use anyhow::Result;
use arca_core::Config;
use arca_storage::{create_chain, StorageChain};
use std::sync::Arc;

/// Setup the storage fallback chain from configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<StorageChain>> {
    tracing::info!("Initializing storage fallback chain...");
    let chain = create_chain(config).await?;
    tracing::info!(
        backends = ?chain.backend_types(),
        "Storage fallback chain initialized successfully"
    );
    Ok(chain)
}
