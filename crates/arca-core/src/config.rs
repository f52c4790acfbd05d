//! Configuration module
//!
//! This module provides the application configuration: server settings, the
//! storage fallback order, and per-backend settings. Configuration is built
//! once at startup from the environment and validated before use; the
//! resulting struct is immutable and passed explicitly into the storage
//! chain at construction time.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;
const DEFAULT_FALLBACK_ORDER: &str = "github,local";
const DEFAULT_GITHUB_BRANCH: &str = "main";
const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";
const DEFAULT_GITHUB_PATH_PREFIX: &str = "public/uploads";
const DEFAULT_LOCAL_STORAGE_PATH: &str = "public/uploads";
const DEFAULT_LOCAL_STORAGE_BASE_URL: &str = "/uploads";

/// Settings for the remote git-hosted content API backend.
#[derive(Clone, Debug)]
pub struct GithubConfig {
    pub token: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: String,
    /// API base URL; overridable for tests and GitHub Enterprise hosts.
    pub api_base: String,
    /// Raw content host used to build public file URLs.
    pub raw_base: String,
    /// Repository path under which all attachments are committed.
    pub path_prefix: String,
}

/// Settings for the local filesystem backend.
#[derive(Clone, Debug)]
pub struct LocalConfig {
    /// Directory under the served static root (e.g. "public/uploads").
    pub path: String,
    /// Root-relative URL prefix the directory is served from (e.g. "/uploads").
    pub base_url: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_file_size_bytes: usize,
    /// Ordered list of backends the upload orchestrator tries.
    pub fallback_order: Vec<StorageBackend>,
    pub github: GithubConfig,
    pub local: LocalConfig,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let fallback_order = parse_fallback_order(
            &env::var("STORAGE_FALLBACK_ORDER")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_ORDER.to_string()),
        )?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            fallback_order,
            github: GithubConfig {
                token: env::var("GITHUB_TOKEN").ok().filter(|s| !s.is_empty()),
                owner: env::var("GITHUB_OWNER").ok().filter(|s| !s.is_empty()),
                repo: env::var("GITHUB_REPO").ok().filter(|s| !s.is_empty()),
                branch: env::var("GITHUB_BRANCH")
                    .unwrap_or_else(|_| DEFAULT_GITHUB_BRANCH.to_string()),
                api_base: env::var("GITHUB_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_GITHUB_API_BASE.to_string()),
                raw_base: env::var("GITHUB_RAW_BASE")
                    .unwrap_or_else(|_| DEFAULT_GITHUB_RAW_BASE.to_string()),
                path_prefix: env::var("GITHUB_PATH_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_GITHUB_PATH_PREFIX.to_string()),
            },
            local: LocalConfig {
                path: env::var("LOCAL_STORAGE_PATH")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
                base_url: env::var("LOCAL_STORAGE_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_STORAGE_BASE_URL.to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.fallback_order.is_empty() {
            return Err(anyhow::anyhow!(
                "STORAGE_FALLBACK_ORDER must name at least one backend"
            ));
        }

        // Validate per-backend configuration for every configured backend
        for backend in &self.fallback_order {
            match backend {
                StorageBackend::Github => {
                    if self.github.token.is_none() {
                        return Err(anyhow::anyhow!(
                            "GITHUB_TOKEN must be set when using the github storage backend"
                        ));
                    }
                    if self.github.owner.is_none() || self.github.repo.is_none() {
                        return Err(anyhow::anyhow!(
                            "GITHUB_OWNER and GITHUB_REPO must be set when using the github storage backend"
                        ));
                    }
                }
                StorageBackend::Local => {
                    if self.local.path.trim().is_empty() {
                        return Err(anyhow::anyhow!(
                            "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                        ));
                    }
                    if self.local.base_url.trim().is_empty() {
                        return Err(anyhow::anyhow!(
                            "LOCAL_STORAGE_BASE_URL must be set when using the local storage backend"
                        ));
                    }
                }
                StorageBackend::Inline => {}
            }
        }

        Ok(())
    }
}

/// Parse the comma-separated fallback order, rejecting duplicates and
/// unknown backend names.
fn parse_fallback_order(raw: &str) -> Result<Vec<StorageBackend>, anyhow::Error> {
    let mut order = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let backend = StorageBackend::from_str(part)?;
        if order.contains(&backend) {
            return Err(anyhow::anyhow!(
                "STORAGE_FALLBACK_ORDER lists '{}' more than once",
                backend
            ));
        }
        order.push(backend);
    }
    Ok(order)
}
