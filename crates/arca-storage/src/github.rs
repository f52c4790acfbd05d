use crate::traits::{FileLocator, Storage, StorageError, StorageResult, StoredFile};
use arca_core::{Category, GithubConfig, StorageBackend};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

const USER_AGENT: &str = concat!("arca/", env!("CARGO_PKG_VERSION"));

/// GitHub contents API storage implementation
///
/// Uses a version-controlled repository as a durable object store: each
/// upload is a create-or-update commit addressed by repository path, and the
/// returned content sha is required to delete the object later.
#[derive(Clone)]
pub struct GithubStorage {
    client: reqwest::Client,
    token: String,
    owner: String,
    repo: String,
    branch: String,
    api_base: String,
    raw_base: String,
    path_prefix: String,
}

/// Response body of a successful contents-API write.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: ContentsObject,
}

#[derive(Debug, Deserialize)]
struct ContentsObject {
    sha: String,
    html_url: Option<String>,
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl GithubStorage {
    /// Create a new GithubStorage instance from configuration.
    ///
    /// `api_base` is overridable for tests and GitHub Enterprise hosts, the
    /// same way an S3 client takes a custom endpoint.
    pub fn new(config: &GithubConfig) -> StorageResult<Self> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| StorageError::ConfigError("GITHUB_TOKEN not configured".to_string()))?;
        let owner = config
            .owner
            .clone()
            .ok_or_else(|| StorageError::ConfigError("GITHUB_OWNER not configured".to_string()))?;
        let repo = config
            .repo
            .clone()
            .ok_or_else(|| StorageError::ConfigError("GITHUB_REPO not configured".to_string()))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(GithubStorage {
            client,
            token,
            owner,
            repo,
            branch: config.branch.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            raw_base: config.raw_base.trim_end_matches('/').to_string(),
            path_prefix: config.path_prefix.trim_matches('/').to_string(),
        })
    }

    /// Repository path for a file: `{prefix}/{category_dir}/{file_name}`.
    fn content_path(&self, category: Category, file_name: &str) -> String {
        if self.path_prefix.is_empty() {
            format!("{}/{}", category.dir(), file_name)
        } else {
            format!("{}/{}/{}", self.path_prefix, category.dir(), file_name)
        }
    }

    /// Contents-API URL for a repository path, with each segment encoded.
    fn api_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base,
            self.owner,
            self.repo,
            encoded.join("/")
        )
    }

    /// Public raw-content URL for a repository path.
    fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, self.owner, self.repo, self.branch, path
        )
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.token)
    }

    /// Extract the API's error message from a non-2xx response body.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "no error details".to_string());
        format!("{}: {}", status, message)
    }
}

#[async_trait]
impl Storage for GithubStorage {
    async fn upload(
        &self,
        category: Category,
        file_name: &str,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile> {
        let path = self.content_path(category, file_name);
        let url = self.api_url(&path);
        let size = data.len();
        let start = std::time::Instant::now();

        let body = serde_json::json!({
            "message": format!("Add {} to {}", original_name, category),
            "content": BASE64.encode(data),
            "branch": self.branch,
        });

        let response = self
            .client
            .put(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    path = %path,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GitHub upload request failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            tracing::error!(
                error = %message,
                path = %path,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GitHub upload rejected"
            );
            return Err(StorageError::UploadFailed(message));
        }

        let parsed: ContentsResponse = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Invalid API response: {}", e)))?;

        let file_url = self.raw_url(&path);

        tracing::info!(
            path = %path,
            sha = %parsed.content.sha,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GitHub upload successful"
        );

        Ok(StoredFile {
            file_name: file_name.to_string(),
            file_path: path,
            file_url,
            file_size: size,
            content_type: content_type.to_string(),
            backend: StorageBackend::Github,
            github_sha: Some(parsed.content.sha),
            github_url: parsed.content.html_url,
        })
    }

    async fn download(&self, category: Category, file_name: &str) -> StorageResult<Vec<u8>> {
        let path = self.content_path(category, file_name);
        let url = self.raw_url(&path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(path));
        }
        if !response.status().is_success() {
            return Err(StorageError::DownloadFailed(format!(
                "{} fetching {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, locator: &FileLocator) -> StorageResult<()> {
        let path = locator.file_path.as_deref().ok_or_else(|| {
            StorageError::InvalidKey("GitHub deletion requires the stored file path".to_string())
        })?;
        let sha = locator.sha.as_deref().ok_or_else(|| {
            StorageError::InvalidKey("GitHub deletion requires the stored content sha".to_string())
        })?;

        let url = self.api_url(path);
        let start = std::time::Instant::now();

        let body = serde_json::json!({
            "message": format!("Delete {}", path),
            "sha": sha,
            "branch": self.branch,
        });

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    path = %path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GitHub delete request failed"
                );
                StorageError::DeleteFailed(e.to_string())
            })?;

        // The object being gone already is success.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            tracing::error!(
                error = %message,
                path = %path,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GitHub delete rejected"
            );
            return Err(StorageError::DeleteFailed(message));
        }

        tracing::info!(
            path = %path,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GitHub delete successful"
        );

        Ok(())
    }

    async fn exists(&self, category: Category, file_name: &str) -> StorageResult<bool> {
        let path = self.content_path(category, file_name);
        let url = self.api_url(&path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => Err(StorageError::BackendError(format!(
                "{} checking {}",
                status, path
            ))),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Github
    }
}
