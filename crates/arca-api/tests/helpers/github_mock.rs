//! In-process mock of the remote content API.
//!
//! Serves both the contents endpoint (`/repos/{owner}/{repo}/contents/...`)
//! and the raw-content host (`/{owner}/{repo}/{branch}/...`) so uploads can
//! be round-tripped without leaving the process.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockContentApi {
    /// Decoded file bytes by repository path.
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    /// Commit messages seen on uploads.
    pub upload_messages: Mutex<Vec<String>>,
    /// (path, sha) pairs seen on deletes.
    pub delete_calls: Mutex<Vec<(String, String)>>,
    /// When set, every upload is rejected with a 500.
    pub fail_uploads: bool,
}

pub struct MockServer {
    pub base_url: String,
    pub api: Arc<MockContentApi>,
}

pub async fn spawn(fail_uploads: bool) -> MockServer {
    let api = Arc::new(MockContentApi {
        fail_uploads,
        ..Default::default()
    });

    let router = Router::new()
        .route(
            "/repos/{owner}/{repo}/contents/{*path}",
            put(put_contents).delete(delete_contents),
        )
        .route("/{owner}/{repo}/{branch}/{*path}", get(get_raw))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Failed to read mock address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock server died");
    });

    MockServer {
        base_url: format!("http://{}", addr),
        api,
    }
}

async fn put_contents(
    State(api): State<Arc<MockContentApi>>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if api.fail_uploads {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "simulated outage" })),
        );
    }

    let content = body
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let decoded = match BASE64.decode(content) {
        Ok(bytes) => bytes,
        Err(_) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "message": "content is not valid base64" })),
            );
        }
    };

    if let Some(message) = body.get("message").and_then(|v| v.as_str()) {
        api.upload_messages
            .lock()
            .unwrap()
            .push(message.to_string());
    }
    api.files.lock().unwrap().insert(path.clone(), decoded);

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "content": {
                "sha": format!("mocksha-{}", path.len()),
                "html_url": format!("https://github.com/{}/{}/blob/main/{}", owner, repo, path),
            }
        })),
    )
}

async fn delete_contents(
    State(api): State<Arc<MockContentApi>>,
    Path((_owner, _repo, path)): Path<(String, String, String)>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let sha = body
        .get("sha")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if sha.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "message": "sha is required" })),
        );
    }

    api.delete_calls.lock().unwrap().push((path.clone(), sha));
    let removed = api.files.lock().unwrap().remove(&path).is_some();

    if removed {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "content": null })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "Not Found" })),
        )
    }
}

async fn get_raw(
    State(api): State<Arc<MockContentApi>>,
    Path((_owner, _repo, _branch, path)): Path<(String, String, String, String)>,
) -> Result<Vec<u8>, StatusCode> {
    api.files
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)
}
