//! Fallback chain integration tests against a mock remote content API.
//!
//! Run with: `cargo test -p arca-api --test fallback_test`

mod helpers;

use arca_core::StorageBackend;
use axum_test::multipart::{MultipartForm, Part};
use helpers::{base_config, github_mock, spawn_app};

fn upload_form(bytes: &'static [u8], file_name: &str, bucket: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(bytes)
                .file_name(file_name.to_string())
                .mime_type("text/plain"),
        )
        .add_text("bucket", bucket.to_string())
}

#[tokio::test]
async fn test_remote_failure_falls_back_to_local() {
    let mock = github_mock::spawn(true).await;
    let upload_root = tempfile::tempdir().unwrap();

    let mut config = base_config(
        vec![StorageBackend::Github, StorageBackend::Local],
        &upload_root,
    );
    config.github.api_base = mock.base_url.clone();
    config.github.raw_base = mock.base_url.clone();
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"0123456789", "a.txt", "budgets"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();

    // The remote backend was tried and rejected the write.
    assert!(mock.api.files.lock().unwrap().is_empty());

    // The local backend took over with the same generated file name.
    let file_name = body["fileName"].as_str().unwrap();
    let (prefix, rest) = file_name.split_once('-').unwrap();
    assert!(prefix.parse::<i64>().is_ok());
    assert_eq!(rest, "a.txt");

    let file_url = body["fileUrl"].as_str().unwrap();
    assert!(file_url.starts_with("/uploads/budget-files/"));
    assert!(body.get("githubSha").is_none());

    let on_disk =
        std::fs::read(upload_root.path().join("budget-files").join(file_name)).unwrap();
    assert_eq!(on_disk, b"0123456789");
}

#[tokio::test]
async fn test_unreachable_remote_falls_back_to_local() {
    let upload_root = tempfile::tempdir().unwrap();

    let mut config = base_config(
        vec![StorageBackend::Github, StorageBackend::Local],
        &upload_root,
    );
    // Nothing listens here; the connection is refused immediately.
    config.github.api_base = "http://127.0.0.1:1".to_string();
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"fallback", "b.txt", "rules"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["fileUrl"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/rules-files/"));
}

#[tokio::test]
async fn test_remote_success_returns_raw_url_and_sha() {
    let mock = github_mock::spawn(false).await;
    let upload_root = tempfile::tempdir().unwrap();

    let mut config = base_config(
        vec![StorageBackend::Github, StorageBackend::Local],
        &upload_root,
    );
    config.github.api_base = mock.base_url.clone();
    config.github.raw_base = mock.base_url.clone();
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"0123456789", "a.txt", "budgets"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();

    // Absolute URL on the raw-content host.
    let file_url = body["fileUrl"].as_str().unwrap();
    assert!(file_url.starts_with(&mock.base_url));
    assert!(file_url.contains("/finance-office/attachments/main/public/uploads/budget-files/"));

    // Content hash is surfaced so the caller can persist it for deletion.
    let sha = body["githubSha"].as_str().unwrap();
    assert!(!sha.is_empty());
    assert!(body["githubUrl"].as_str().is_some());

    // Nothing fell through to disk.
    let entries: Vec<_> = std::fs::read_dir(upload_root.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty());

    // The committed bytes round-trip to the original content.
    let file_path = body["filePath"].as_str().unwrap();
    let stored = mock.api.files.lock().unwrap().get(file_path).cloned().unwrap();
    assert_eq!(stored, b"0123456789");

    // Commit message names the original file and bucket.
    let messages = mock.api.upload_messages.lock().unwrap();
    assert_eq!(messages.as_slice(), ["Add a.txt to budgets"]);
}

#[tokio::test]
async fn test_remote_delete_uses_path_and_sha() {
    let mock = github_mock::spawn(false).await;
    let upload_root = tempfile::tempdir().unwrap();

    let mut config = base_config(
        vec![StorageBackend::Github, StorageBackend::Local],
        &upload_root,
    );
    config.github.api_base = mock.base_url.clone();
    config.github.raw_base = mock.base_url.clone();
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"to be removed", "old.txt", "downloads"))
        .await;
    let body: serde_json::Value = response.json();
    let file_path = body["filePath"].as_str().unwrap().to_string();
    let sha = body["githubSha"].as_str().unwrap().to_string();

    let response = server
        .delete("/api/uploads")
        .add_query_param("filePath", &file_path)
        .add_query_param("sha", &sha)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    assert!(mock.api.files.lock().unwrap().is_empty());
    let delete_calls = mock.api.delete_calls.lock().unwrap();
    assert_eq!(delete_calls.as_slice(), [(file_path, sha)]);
}
