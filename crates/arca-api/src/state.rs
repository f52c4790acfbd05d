//! Application state.

use arca_core::Config;
use arca_storage::StorageChain;
use std::sync::Arc;

/// Main application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<StorageChain>,
    pub is_production: bool,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<StorageChain>) -> Self {
        let is_production = config.is_production();
        AppState {
            config,
            storage,
            is_production,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
