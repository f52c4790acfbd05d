//! Shared helpers for API integration tests.

pub mod github_mock;

use arca_core::{Config, GithubConfig, LocalConfig, StorageBackend};
use axum_test::TestServer;
use tempfile::TempDir;

/// Base configuration for tests: fallback order is supplied per test, local
/// storage points at a temp directory, and the github settings carry dummy
/// credentials so validation passes (the api_base is overridden by tests
/// that exercise the remote backend).
pub fn base_config(order: Vec<StorageBackend>, upload_root: &TempDir) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        max_file_size_bytes: 10 * 1024 * 1024,
        fallback_order: order,
        github: GithubConfig {
            token: Some("test-token".to_string()),
            owner: Some("finance-office".to_string()),
            repo: Some("attachments".to_string()),
            branch: "main".to_string(),
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            path_prefix: "public/uploads".to_string(),
        },
        local: LocalConfig {
            path: upload_root.path().display().to_string(),
            base_url: "/uploads".to_string(),
        },
    }
}

/// Build the application router for the given config and wrap it in a test
/// server.
pub async fn spawn_app(config: Config) -> TestServer {
    let (_state, router) = arca_api::setup::initialize_app(config)
        .await
        .expect("Failed to initialize app");
    TestServer::new(router).expect("Failed to start test server")
}
