//! Upload API integration tests against the local and inline backends.
//!
//! Run with: `cargo test -p arca-api --test uploads_test`

mod helpers;

use arca_core::StorageBackend;
use axum_test::multipart::{MultipartForm, Part};
use helpers::{base_config, spawn_app};

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
async fn test_upload_to_local_backend() {
    let upload_root = tempfile::tempdir().unwrap();
    let config = base_config(vec![StorageBackend::Local], &upload_root);
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"0123456789", "a.txt", "budgets"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();

    let file_name = body["fileName"].as_str().unwrap();
    let (prefix, rest) = file_name.split_once('-').unwrap();
    assert!(prefix.parse::<i64>().is_ok());
    assert_eq!(rest, "a.txt");

    let file_url = body["fileUrl"].as_str().unwrap();
    assert!(file_url.starts_with("/uploads/budget-files/"));
    assert_eq!(body["fileSize"], 10);
    assert_eq!(body["fileType"], "text/plain");
    assert!(body.get("githubSha").is_none());

    let on_disk = std::fs::read(
        upload_root
            .path()
            .join("budget-files")
            .join(file_name),
    )
    .unwrap();
    assert_eq!(on_disk, b"0123456789");
}

#[tokio::test]
async fn test_round_trip_through_serving_endpoint() {
    let upload_root = tempfile::tempdir().unwrap();
    let config = base_config(vec![StorageBackend::Local], &upload_root);
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"quarterly budget data", "q3.csv", "budgets"))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let file_url = body["fileUrl"].as_str().unwrap().to_string();

    let served = server.get(&file_url).await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.as_bytes().as_ref(), b"quarterly budget data");
}

#[tokio::test]
async fn test_invalid_bucket_rejected_before_any_io() {
    let upload_root = tempfile::tempdir().unwrap();
    let config = base_config(vec![StorageBackend::Local], &upload_root);
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"data", "a.txt", "nonexistent"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Invalid bucket"));

    // No bucket directory was created: the request was rejected before
    // storage I/O.
    let entries: Vec<_> = std::fs::read_dir(upload_root.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_missing_file_field_is_rejected() {
    let upload_root = tempfile::tempdir().unwrap();
    let config = base_config(vec![StorageBackend::Local], &upload_root);
    let server = spawn_app(config).await;

    let form = MultipartForm::new().add_text("bucket", "budgets");
    let response = server.post("/api/uploads").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn test_missing_bucket_field_is_rejected() {
    let upload_root = tempfile::tempdir().unwrap();
    let config = base_config(vec![StorageBackend::Local], &upload_root);
    let server = spawn_app(config).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"data".as_slice())
            .file_name("a.txt")
            .mime_type("text/plain"),
    );
    let response = server.post("/api/uploads").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No bucket provided");
}

#[tokio::test]
async fn test_inline_mode_returns_data_uri() {
    let upload_root = tempfile::tempdir().unwrap();
    let config = base_config(vec![StorageBackend::Inline], &upload_root);
    let server = spawn_app(config).await;

    let response = server
        .post("/api/uploads")
        .multipart(upload_form(b"hello", "note.txt", "updates"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["fileUrl"], "data:text/plain;base64,aGVsbG8=");
    let file_path = body["filePath"].as_str().unwrap();
    assert!(file_path.starts_with("update-files/"));

    // Inline mode never touches disk.
    let entries: Vec<_> = std::fs::read_dir(upload_root.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_health_reports_local_backend() {
    let upload_root = tempfile::tempdir().unwrap();
    let config = base_config(vec![StorageBackend::Local], &upload_root);
    let server = spawn_app(config).await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"][0]["backend"], "local");
    assert_eq!(body["storage"][0]["status"], "healthy");
}
