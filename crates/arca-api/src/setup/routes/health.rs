//! Health check handlers and response types.

use crate::state::AppState;
use arca_core::{Category, StorageBackend};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(crate) struct BackendHealth {
    pub backend: StorageBackend,
    pub status: String,
}

#[derive(serde::Serialize)]
pub(crate) struct HealthCheckResponse {
    pub status: String,
    pub environment: String,
    pub storage: Vec<BackendHealth>,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check across the configured storage backends.
///
/// Only the local backend is actively probed; a hung remote call must not
/// hang the health endpoint, so remote and inline backends report as
/// configured without a round trip.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut storage = Vec::new();
    let mut overall_healthy = true;

    for backend_type in state.storage.backend_types() {
        let status = match backend_type {
            StorageBackend::Local => match state.storage.backend(backend_type).cloned() {
                Some(backend) => {
                    run_check(
                        TIMEOUT,
                        async move {
                            backend
                                .exists(Category::Budgets, "health-check-non-existent-file")
                                .await
                                .map(drop)
                        },
                        "degraded",
                    )
                    .await
                }
                None => "not_configured".to_string(),
            },
            StorageBackend::Github | StorageBackend::Inline => "configured".to_string(),
        };

        if status != "healthy" && status != "configured" {
            overall_healthy = false;
        }
        storage.push(BackendHealth {
            backend: backend_type,
            status,
        });
    }

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthCheckResponse {
        status: if overall_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        environment: state.config.environment.clone(),
        storage,
    };

    (status_code, Json(response))
}
